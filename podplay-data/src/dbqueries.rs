// dbqueries.rs
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

//! Random CRUD helper functions.

use diesel::prelude::*;

use diesel::dsl::exists;
use diesel::select;

use crate::database::connection;
use crate::errors::DataError;
use crate::models::*;

/// All the podcasts of the library, ordered by title.
///
/// The ordering is case sensitive, whatever SQLite's BINARY collation
/// says goes.
pub fn get_podcasts() -> Result<Vec<Podcast>, DataError> {
    use crate::schema::podcasts::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    podcasts
        .order(feed_title.asc())
        .load::<Podcast>(&mut con)
        .map_err(From::from)
}

/// Every episode in the library, newest first.
pub fn get_episodes() -> Result<Vec<Episode>, DataError> {
    use crate::schema::episodes::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    episodes
        .order(release_date.desc())
        .load::<Episode>(&mut con)
        .map_err(From::from)
}

pub fn get_podcast_from_id(pid: i32) -> Result<Podcast, DataError> {
    use crate::schema::podcasts::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    podcasts
        .filter(id.eq(pid))
        .get_result::<Podcast>(&mut con)
        .map_err(From::from)
}

/// Look a podcast up by its feed url.
///
/// Zero matches is not an error, you get `None` back.
pub fn get_podcast_from_url(url: &str) -> Result<Option<Podcast>, DataError> {
    use crate::schema::podcasts::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    podcasts
        .filter(feed_url.eq(url))
        .first::<Podcast>(&mut con)
        .optional()
        .map_err(From::from)
}

/// The episodes of a podcast, newest first.
pub fn get_pd_episodes(parent: &Podcast) -> Result<Vec<Episode>, DataError> {
    use crate::schema::episodes::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    Episode::belonging_to(parent)
        .order(release_date.desc())
        .load::<Episode>(&mut con)
        .map_err(From::from)
}

pub fn get_pd_episodes_count(parent: &Podcast) -> Result<i64, DataError> {
    let db = connection();
    let mut con = db.get()?;

    Episode::belonging_to(parent)
        .count()
        .get_result(&mut con)
        .map_err(From::from)
}

/// The episodes of a podcast released strictly after `epoch`, newest
/// first. This is what the background update job diffs against
/// `Podcast::last_updated`.
pub fn get_pd_episodes_since(parent: &Podcast, epoch: i64) -> Result<Vec<Episode>, DataError> {
    use crate::schema::episodes::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    episodes
        .filter(podcast_id.eq(parent.id()))
        .filter(release_date.gt(epoch))
        .order(release_date.desc())
        .load::<Episode>(&mut con)
        .map_err(From::from)
}

/// Look an episode up by its feed-assigned guid.
pub fn get_episode_from_guid(guid_: &str) -> Result<Option<Episode>, DataError> {
    use crate::schema::episodes::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    episodes
        .filter(guid.eq(guid_))
        .first::<Episode>(&mut con)
        .optional()
        .map_err(From::from)
}

pub fn podcast_exists(url: &str) -> Result<bool, DataError> {
    use crate::schema::podcasts::dsl::*;

    let db = connection();
    let mut con = db.get()?;

    select(exists(podcasts.filter(feed_url.eq(url))))
        .get_result(&mut con)
        .map_err(From::from)
}

pub fn episode_exists(guid_: &str) -> Result<bool, DataError> {
    use crate::schema::episodes::dsl::*;

    let db = connection();
    let mut con = db.get()?;

    select(exists(episodes.filter(guid.eq(guid_))))
        .get_result(&mut con)
        .map_err(From::from)
}

/// Delete a podcast row.
///
/// Runs in a transaction, the cascading foreign key takes the episodes
/// with it so a partial delete is never observable.
pub fn remove_podcast(pd: &Podcast) -> Result<(), DataError> {
    use crate::schema::podcasts::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    con.transaction::<(), DataError, _>(|con| {
        diesel::delete(podcasts.filter(id.eq(pd.id()))).execute(con)?;
        Ok(())
    })?;
    info!("Podcast removed from the Database.");
    Ok(())
}

/// Batch insert-or-replace the episodes of a freshly parsed feed.
pub fn index_new_episodes(eps: &[NewEpisode]) -> Result<(), DataError> {
    use crate::schema::episodes::dsl::*;
    let db = connection();
    let mut con = db.get()?;

    diesel::replace_into(episodes)
        .values(eps)
        .execute(&mut con)
        .map(|_| ())
        .map_err(From::from)
}
