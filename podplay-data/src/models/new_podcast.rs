// new_podcast.rs
//
// Copyright 2023 Jordan Petridis <jpetridis@gnome.org>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::Utc;
use diesel::prelude::*;

use crate::database::connection;
use crate::dbqueries;
use crate::errors::DataError;
use crate::models::{Index, Insert, Podcast, Update};
use crate::schema::podcasts;
use crate::utils::url_cleaner;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = podcasts)]
#[derive(Debug, Clone, Default, Builder, PartialEq)]
#[builder(default)]
#[builder(derive(Debug))]
#[builder(setter(into))]
/// A podcast row that has not made it to the database yet.
pub struct NewPodcast {
    feed_url: String,
    feed_title: String,
    feed_desc: String,
    image_url: String,
    last_updated: i64,
}

impl Insert<()> for NewPodcast {
    type Error = DataError;

    /// Insert-or-replace. A row with the same `id` or `feed_url` is
    /// overwritten, and since SQLite implements REPLACE as
    /// delete-and-insert the episodes of the old row cascade away with
    /// it. Use [`index`](Index::index) to refresh a podcast in place.
    fn insert(&self) -> Result<(), Self::Error> {
        use crate::schema::podcasts::dsl::*;
        let db = connection();
        let mut con = db.get()?;

        diesel::replace_into(podcasts)
            .values(self)
            .execute(&mut con)
            .map(|_| ())
            .map_err(From::from)
    }
}

impl Update<()> for NewPodcast {
    type Error = DataError;

    fn update(&self, podcast_id: i32) -> Result<(), Self::Error> {
        use crate::schema::podcasts::dsl::*;
        let db = connection();
        let mut con = db.get()?;

        info!("Updating {}", self.feed_title);
        diesel::update(podcasts.filter(id.eq(podcast_id)))
            .set(self)
            .execute(&mut con)
            .map(|_| ())
            .map_err(From::from)
    }
}

impl Index<()> for NewPodcast {
    type Error = DataError;

    /// Upsert keyed on `feed_url`. An existing row is updated in place,
    /// keeping its `id` and therefore its episodes.
    fn index(&self) -> Result<(), DataError> {
        match dbqueries::get_podcast_from_url(&self.feed_url)? {
            Some(other) => {
                if self != &other {
                    self.update(other.id())
                } else {
                    Ok(())
                }
            }
            None => self.insert(),
        }
    }
}

impl PartialEq<Podcast> for NewPodcast {
    fn eq(&self, other: &Podcast) -> bool {
        (self.feed_url() == other.feed_url())
            && (self.feed_title() == other.feed_title())
            && (self.feed_desc() == other.feed_desc())
            && (self.image_url() == other.image_url())
            && (self.last_updated() == other.last_updated())
    }
}

impl NewPodcast {
    /// Construct a `NewPodcast` from the parsed parts of a feed.
    ///
    /// The feed url is stripped of fragments and surrounding whitespace
    /// first, so lookups against it behave, and `last_updated` is
    /// stamped with the current time.
    pub fn new(feed_url: &str, feed_title: &str, feed_desc: &str, image_url: &str) -> NewPodcast {
        NewPodcastBuilder::default()
            .feed_url(url_cleaner(feed_url))
            .feed_title(feed_title.trim())
            .feed_desc(feed_desc.trim())
            .image_url(image_url.trim())
            .last_updated(Utc::now().timestamp())
            .build()
            .unwrap()
    }

    /// Index `self` and return the persisted row.
    pub fn to_podcast(&self) -> Result<Podcast, DataError> {
        self.index()?;
        dbqueries::get_podcast_from_url(&self.feed_url)?.ok_or_else(|| {
            DataError::Bail(format!("Failed to get podcast for url: {}", self.feed_url))
        })
    }
}

// Ignore the following getters. They are used in unit tests mainly.
impl NewPodcast {
    pub(crate) fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub(crate) fn feed_title(&self) -> &str {
        &self.feed_title
    }

    pub(crate) fn feed_desc(&self) -> &str {
        &self.feed_desc
    }

    pub(crate) fn image_url(&self) -> &str {
        &self.image_url
    }

    pub(crate) fn last_updated(&self) -> i64 {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Result;

    use crate::database::{test_lock, truncate_db};
    use crate::models::NewEpisodeBuilder;

    fn intercepted() -> NewPodcast {
        NewPodcastBuilder::default()
            .feed_url("https://feeds.feedburner.com/InterceptedWithJeremyScahill")
            .feed_title("Intercepted with Jeremy Scahill")
            .feed_desc("The people behind The Intercept's fearless reporting.")
            .image_url("http://static.megaphone.fm/podcasts/intercepted.png")
            .last_updated(1_516_435_200_i64)
            .build()
            .unwrap()
    }

    fn updated_intercepted() -> NewPodcast {
        NewPodcastBuilder::default()
            .feed_url("https://feeds.feedburner.com/InterceptedWithJeremyScahill")
            .feed_title("Intercepted with Jeremy Scahill")
            .feed_desc("New Description")
            .image_url("http://static.megaphone.fm/podcasts/intercepted.png")
            .last_updated(1_516_521_600_i64)
            .build()
            .unwrap()
    }

    fn add_episode(pd: &Podcast, guid: &str) -> Result<()> {
        NewEpisodeBuilder::default()
            .guid(guid)
            .podcast_id(pd.id())
            .title("An Episode")
            .build()
            .unwrap()
            .insert()?;
        Ok(())
    }

    #[test]
    fn test_new_podcast() {
        let pd = NewPodcast::new(
            " https://example.com/feed.rss#fragment\t",
            " Example ",
            "Description",
            "https://example.com/cover.jpg",
        );

        assert_eq!(pd.feed_url(), "https://example.com/feed.rss");
        assert_eq!(pd.feed_title(), "Example");
        assert!(pd.last_updated() > 0);
    }

    #[test]
    fn test_insert_replaces_row_with_same_url() -> Result<()> {
        let _lock = test_lock();
        truncate_db()?;

        intercepted().insert()?;
        updated_intercepted().insert()?;

        let podcasts = dbqueries::get_podcasts()?;
        assert_eq!(podcasts.len(), 1);
        assert_eq!(&updated_intercepted(), &podcasts[0]);
        Ok(())
    }

    #[test]
    fn test_insert_replace_cascades() -> Result<()> {
        let _lock = test_lock();
        truncate_db()?;

        let old = intercepted().to_podcast()?;
        add_episode(&old, "episode-1")?;

        updated_intercepted().insert()?;
        let new = dbqueries::get_podcast_from_url(old.feed_url())?.unwrap();

        assert_ne!(old.id(), new.id());
        assert!(dbqueries::get_episodes()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_update() -> Result<()> {
        let _lock = test_lock();
        truncate_db()?;

        let old = intercepted().to_podcast()?;

        let updated = updated_intercepted();
        updated.update(old.id())?;
        let new = dbqueries::get_podcast_from_url(old.feed_url())?.unwrap();

        assert_ne!(old, new);
        assert_eq!(old.id(), new.id());
        assert_eq!(&updated, &new);
        assert_ne!(&updated, &old);
        Ok(())
    }

    #[test]
    fn test_index() -> Result<()> {
        let _lock = test_lock();
        truncate_db()?;

        // First index inserts.
        intercepted().index()?;
        // Second identical index takes the early return path.
        intercepted().index()?;
        let old = dbqueries::get_podcast_from_url(intercepted().feed_url())?.unwrap();
        assert_eq!(&intercepted(), &old);

        add_episode(&old, "episode-1")?;

        // A changed feed updates in place, the id and the episodes
        // survive.
        updated_intercepted().index()?;
        let new = dbqueries::get_podcast_from_url(old.feed_url())?.unwrap();
        assert_ne!(new, old);
        assert_eq!(new.id(), old.id());
        assert_eq!(dbqueries::get_pd_episodes_count(&new)?, 1);
        Ok(())
    }

    #[test]
    fn test_to_podcast() -> Result<()> {
        let _lock = test_lock();
        truncate_db()?;

        let pd = intercepted().to_podcast()?;
        let stored = dbqueries::get_podcast_from_url(intercepted().feed_url())?.unwrap();

        assert_eq!(pd, stored);
        assert_eq!(&intercepted(), &pd);
        Ok(())
    }
}
