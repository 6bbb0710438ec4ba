// lib.rs
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

//! The storage layer of the PodPlay podcast library.
//!
//! Two tables, `podcasts` and `episodes`, over an embedded SQLite database.
//! Every episode belongs to a podcast and is removed along with it through
//! a cascading foreign key.

#![warn(nonstandard_style, unused)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    elided_lifetime_in_paths
)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate diesel;
#[macro_use]
extern crate log;

pub mod database;
#[allow(missing_docs)]
pub mod dbqueries;
#[allow(missing_docs)]
pub mod errors;
pub(crate) mod models;
mod schema;
pub mod utils;

pub use crate::models::{Index, Insert, Save, Update};
pub use crate::models::{
    Episode, NewEpisode, NewEpisodeBuilder, NewPodcast, NewPodcastBuilder, Podcast,
};

/// [XDG Base Directory](https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html) Paths.
#[allow(missing_debug_implementations)]
pub mod xdg_dirs {
    use std::path::PathBuf;
    use std::sync::LazyLock;

    pub(crate) static PODPLAY_XDG: LazyLock<xdg::BaseDirectories> =
        LazyLock::new(|| xdg::BaseDirectories::with_prefix("podplay").unwrap());

    /// XDG_DATA Directory `PathBuf`.
    pub static PODPLAY_DATA: LazyLock<PathBuf> = LazyLock::new(|| {
        PODPLAY_XDG
            .create_data_directory(PODPLAY_XDG.get_data_home())
            .unwrap()
    });
}
