// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Resolves free-form object names ("my sword", "2nd apple", "*Alice", "#42") against a
//! shared, mutable MUSH object graph, on behalf of a looker and an executor.

pub mod config;
pub mod locate;

pub use config::LocateConfig;
pub use locate::{LocateError, LocateOutcome, Locator};
