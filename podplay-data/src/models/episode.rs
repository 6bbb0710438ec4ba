// episode.rs
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

use crate::models::Podcast;
use crate::schema::episodes;

#[derive(Queryable, Identifiable, Associations, PartialEq)]
#[diesel(table_name = episodes)]
#[diesel(primary_key(guid))]
#[diesel(belongs_to(Podcast, foreign_key = podcast_id))]
#[derive(Debug, Clone)]
/// Diesel Model of the episodes table.
///
/// Episodes are never edited in place. A fresh parse of the feed
/// replaces the whole row, keyed on `guid`.
pub struct Episode {
    guid: String,
    podcast_id: Option<i32>,
    title: String,
    description: String,
    media_url: String,
    mime_type: String,
    release_date: i64,
    duration: String,
}

impl Episode {
    /// Get the `guid`.
    ///
    /// The feed-assigned globally unique identifier of the episode.
    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// `podcasts` table foreign key.
    pub fn podcast_id(&self) -> Option<i32> {
        self.podcast_id
    }

    /// Get the value of the `title` field.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the `description`.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the `media_url`.
    ///
    /// The url the audio file is located at.
    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    /// Get the `mime_type` of the media file.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Get the `release_date` epoch.
    ///
    /// The Unix timestamp the episode was published at.
    pub fn release_date(&self) -> i64 {
        self.release_date
    }

    /// Get the `duration`.
    ///
    /// Kept verbatim as the feed reported it, e.g. `32:16`.
    pub fn duration(&self) -> &str {
        &self.duration
    }
}
