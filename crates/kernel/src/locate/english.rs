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

//! English-style name prefixes: "this here", "here", "this", "my", "me", "toward", and a
//! leading ordinal such as "2nd".

use locus_common::model::{LocateFlags, Scope};
use tracing::trace;

/// A name with its English prefixes removed, and the scope they narrowed it to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EnglishParse {
    pub name: String,
    pub flags: LocateFlags,
    /// 1-based position to select, or 0 when no ordinal was given.
    pub ordinal: usize,
}

enum Ordinal {
    Valid(usize),
    /// Looked like an ordinal but the suffix disagrees with the number ("2st").
    Mismatched,
    NotOrdinal,
}

/// The English suffix the number `n` takes.
pub(crate) fn ordinal_suffix(n: usize) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

fn parse_ordinal_token(token: &str) -> Ordinal {
    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, suffix) = token.split_at(digits_end);
    if digits.is_empty()
        || !matches!(suffix.to_ascii_lowercase().as_str(), "st" | "nd" | "rd" | "th")
    {
        return Ordinal::NotOrdinal;
    }
    let Ok(n) = digits.parse::<usize>() else {
        return Ordinal::NotOrdinal;
    };
    if n == 0 || !suffix.eq_ignore_ascii_case(ordinal_suffix(n)) {
        return Ordinal::Mismatched;
    }
    Ordinal::Valid(n)
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn without(mut flags: LocateFlags, scopes: &[Scope]) -> LocateFlags {
    flags.scope.remove_all(scopes.iter().copied().collect());
    flags
}

/// Strip English prefixes from `name`, narrowing `flags` to match, then pull off a leading
/// ordinal. A malformed ordinal leaves both name and flags exactly as they came in.
pub fn parse_english(name: &str, flags: LocateFlags) -> EnglishParse {
    let unchanged = EnglishParse {
        name: name.to_string(),
        flags,
        ordinal: 0,
    };
    let mut rest = name;
    let mut narrowed = flags;

    if narrowed.has(Scope::LocationContents) {
        let stripped = strip_prefix_ci(rest, "this here ")
            .or_else(|| strip_prefix_ci(rest, "here "))
            .or_else(|| strip_prefix_ci(rest, "this "));
        if let Some(stripped) = stripped {
            rest = stripped;
            narrowed = without(
                narrowed,
                &[
                    Scope::Inventory,
                    Scope::ExitsInRoom,
                    Scope::GlobalExits,
                    Scope::Container,
                ],
            );
        }
    }

    if narrowed.has(Scope::Inventory)
        && let Some(stripped) =
            strip_prefix_ci(rest, "my ").or_else(|| strip_prefix_ci(rest, "me "))
    {
        rest = stripped;
        narrowed = without(
            narrowed,
            &[
                Scope::LocationContents,
                Scope::Container,
                Scope::ExitsInRoom,
                Scope::ExitsInLooker,
                Scope::GlobalExits,
            ],
        );
    }

    if (narrowed.has(Scope::ExitsInRoom) || narrowed.has(Scope::ExitsInLooker))
        && let Some(stripped) = strip_prefix_ci(rest, "toward ")
    {
        rest = stripped;
        narrowed = without(
            narrowed,
            &[Scope::Inventory, Scope::LocationContents, Scope::Container],
        );
    }

    let rest = rest.trim_start();
    if rest.is_empty() {
        return unchanged;
    }

    let stripped = EnglishParse {
        name: rest.to_string(),
        flags: narrowed,
        ordinal: 0,
    };
    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return stripped;
    }

    let (token, remainder) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    match parse_ordinal_token(token) {
        Ordinal::Valid(n) => {
            let remainder = remainder.trim_start();
            if remainder.is_empty() {
                return stripped;
            }
            trace!(ordinal = n, name = remainder, "parsed ordinal");
            EnglishParse {
                name: remainder.to_string(),
                flags: narrowed,
                ordinal: n,
            }
        }
        Ordinal::Mismatched => unchanged,
        Ordinal::NotOrdinal => stripped,
    }
}
