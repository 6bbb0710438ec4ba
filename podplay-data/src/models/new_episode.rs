// new_episode.rs
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

use diesel::prelude::*;

use crate::database::connection;
use crate::dbqueries;
use crate::errors::DataError;
use crate::models::{Episode, Insert};
use crate::schema::episodes;

#[derive(Insertable)]
#[diesel(table_name = episodes)]
#[derive(Debug, Clone, Default, Builder, PartialEq)]
#[builder(default)]
#[builder(derive(Debug))]
#[builder(setter(into))]
/// An episode row that has not made it to the database yet.
pub struct NewEpisode {
    guid: String,
    podcast_id: Option<i32>,
    title: String,
    description: String,
    media_url: String,
    mime_type: String,
    release_date: i64,
    duration: String,
}

impl Insert<()> for NewEpisode {
    type Error = DataError;

    /// Insert-or-replace keyed on `guid`. Episodes are never edited in
    /// place, a colliding guid overwrites the whole row.
    fn insert(&self) -> Result<(), Self::Error> {
        use crate::schema::episodes::dsl::*;
        let db = connection();
        let mut con = db.get()?;

        diesel::replace_into(episodes)
            .values(self)
            .execute(&mut con)
            .map(|_| ())
            .map_err(From::from)
    }
}

impl PartialEq<Episode> for NewEpisode {
    fn eq(&self, other: &Episode) -> bool {
        (self.guid() == other.guid())
            && (self.podcast_id() == other.podcast_id())
            && (self.title() == other.title())
            && (self.description() == other.description())
            && (self.media_url() == other.media_url())
            && (self.mime_type() == other.mime_type())
            && (self.release_date() == other.release_date())
            && (self.duration() == other.duration())
    }
}

impl NewEpisode {
    /// Insert `self` and return the persisted row.
    pub fn to_episode(&self) -> Result<Episode, DataError> {
        self.insert()?;
        dbqueries::get_episode_from_guid(&self.guid)?
            .ok_or_else(|| DataError::Bail(format!("Failed to get episode for guid: {}", self.guid)))
    }
}

// Ignore the following getters. They are used in unit tests mainly.
impl NewEpisode {
    pub(crate) fn guid(&self) -> &str {
        &self.guid
    }

    pub(crate) fn podcast_id(&self) -> Option<i32> {
        self.podcast_id
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn media_url(&self) -> &str {
        &self.media_url
    }

    pub(crate) fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub(crate) fn release_date(&self) -> i64 {
        self.release_date
    }

    pub(crate) fn duration(&self) -> &str {
        &self.duration
    }
}
