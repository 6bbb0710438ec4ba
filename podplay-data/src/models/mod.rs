// mod.rs
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

mod new_episode;
mod new_podcast;

mod episode;
mod podcast;

pub use self::episode::Episode;
pub use self::new_episode::{NewEpisode, NewEpisodeBuilder};
pub use self::new_podcast::{NewPodcast, NewPodcastBuilder};
pub use self::podcast::Podcast;

/// Write a new row to the database.
pub trait Insert<T> {
    /// The Error type to be returned.
    type Error;

    /// Store `self` as a new row. A collision with an existing primary
    /// or unique key overwrites the existing row instead of failing.
    fn insert(&self) -> Result<T, Self::Error>;
}

/// Overwrite an existing row in place.
pub trait Update<T> {
    /// The Error type to be returned.
    type Error;

    /// Replace the contents of the row with the given id, keeping the
    /// id itself.
    fn update(&self, id: i32) -> Result<T, Self::Error>;
}

/// Insert or update against the natural key, whichever applies.
pub trait Index<T>: Insert<T> + Update<T> {
    /// The Error type to be returned.
    type Error;

    /// Look for an existing row first and update it in place, insert
    /// otherwise.
    fn index(&self) -> Result<T, <Self as Index<T>>::Error>;
}

/// Helper trait to sync the state of a diesel model to the Database.
pub trait Save<T> {
    /// The Error type to be returned.
    type Error;

    /// Helper method to easily save/"sync" current state of a diesel model to
    /// the Database.
    fn save(&self) -> Result<T, Self::Error>;
}
