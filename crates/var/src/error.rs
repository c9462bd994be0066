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

use thiserror::Error;

/// Why a string could not be read as an object reference.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferenceParseError {
    #[error("Expected object reference to start with '#', got {0}")]
    MissingHash(String),
    #[error("Could not parse object number: {0}")]
    BadNumber(String),
    #[error("Could not parse creation timestamp: {0}")]
    BadTimestamp(String),
}
