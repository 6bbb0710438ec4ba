// podcast.rs
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

use chrono::{DateTime, Utc};
use diesel::SaveChangesDsl;

use crate::database::connection;
use crate::errors::DataError;
use crate::models::Save;
use crate::schema::podcasts;

#[derive(Queryable, Identifiable, AsChangeset, PartialEq)]
#[diesel(table_name = podcasts)]
#[derive(Debug, Clone)]
/// Diesel Model of the podcasts table.
pub struct Podcast {
    id: i32,
    feed_url: String,
    feed_title: String,
    feed_desc: String,
    image_url: String,
    last_updated: i64,
}

impl Save<Podcast> for Podcast {
    type Error = DataError;

    /// Helper method to easily save/"sync" current state of self to the
    /// Database.
    fn save(&self) -> Result<Podcast, Self::Error> {
        let db = connection();
        let mut con = db.get()?;

        self.save_changes::<Podcast>(&mut con).map_err(From::from)
    }
}

impl Podcast {
    /// Get the Podcast `id`.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Get the `feed_url`.
    ///
    /// The address the feed is syndicated from, and the natural key a
    /// podcast is looked up by.
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Get the `feed_title`.
    pub fn feed_title(&self) -> &str {
        &self.feed_title
    }

    /// Get the `feed_desc`.
    pub fn feed_desc(&self) -> &str {
        &self.feed_desc
    }

    /// Get the `image_url` of the cover art.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Get the `last_updated` epoch.
    ///
    /// The Unix timestamp of the last successful feed fetch.
    pub fn last_updated(&self) -> i64 {
        self.last_updated
    }

    /// `last_updated` as a `chrono` UTC datetime.
    pub fn last_updated_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_updated, 0)
    }

    /// Set the `last_updated` epoch.
    pub fn set_last_updated(&mut self, epoch: i64) {
        self.last_updated = epoch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Result;
    use chrono::TimeZone;

    use crate::database::{test_lock, truncate_db};
    use crate::dbqueries;
    use crate::models::NewPodcastBuilder;

    #[test]
    fn test_save() -> Result<()> {
        let _lock = test_lock();
        truncate_db()?;

        let mut pd = NewPodcastBuilder::default()
            .feed_url("https://example.com/feed.rss")
            .feed_title("Example")
            .last_updated(100_i64)
            .build()
            .unwrap()
            .to_podcast()?;

        pd.set_last_updated(300);
        let saved = pd.save()?;
        assert_eq!(saved.last_updated(), 300);

        let stored = dbqueries::get_podcast_from_id(pd.id())?;
        assert_eq!(stored.last_updated(), 300);
        assert_eq!(stored, saved);
        Ok(())
    }

    #[test]
    fn test_last_updated_utc() -> Result<()> {
        let _lock = test_lock();
        truncate_db()?;

        let pd = NewPodcastBuilder::default()
            .feed_url("https://example.com/feed.rss")
            .last_updated(1_514_764_800_i64)
            .build()
            .unwrap()
            .to_podcast()?;

        let expected = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(pd.last_updated_utc(), Some(expected));
        Ok(())
    }
}
