#![forbid(unsafe_code)]

//! Command-line operation tokens.
//!
//! | token         | meaning                         |
//! |---------------|---------------------------------|
//! | `add:V`       | append `V`                      |
//! | `push:V`      | push `V`                        |
//! | `enqueue:V`   | enqueue `V`                     |
//! | `insert:V@I`  | insert `V` at index `I`         |
//! | `update:V@I`  | set index `I` to `V`            |
//! | `remove:I`    | remove index `I`                |
//! | `pop`, `peek`, `dequeue`, `clear` | no payload  |
//! | `undo`        | restore the previous contents   |

use std::str::FromStr;

use dsviz_core::{Operation, OperationKind};

use crate::error::DemoError;

/// One step of a scripted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start(Operation),
    Undo,
}

impl FromStr for Intent {
    type Err = DemoError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let (head, payload) = match token.split_once(':') {
            Some((head, payload)) => (head, Some(payload)),
            None => (token, None),
        };
        if head.eq_ignore_ascii_case("undo") {
            return match payload {
                None => Ok(Self::Undo),
                Some(_) => Err(DemoError::intent(token, "undo takes no payload")),
            };
        }

        let kind: OperationKind = head
            .parse()
            .map_err(|e: dsviz_core::UnknownOperation| DemoError::intent(token, e.to_string()))?;
        let op = match (kind.carries_value(), kind.takes_index()) {
            (true, true) => {
                let (value, index) = payload
                    .and_then(|p| p.split_once('@'))
                    .ok_or_else(|| DemoError::intent(token, format!("expected {kind}:VALUE@INDEX")))?;
                Operation {
                    kind,
                    index: Some(parse_index(token, index)?),
                    value: Some(parse_value(token, value)?),
                }
            }
            (true, false) => {
                let value = payload
                    .ok_or_else(|| DemoError::intent(token, format!("expected {kind}:VALUE")))?;
                Operation {
                    kind,
                    index: None,
                    value: Some(parse_value(token, value)?),
                }
            }
            (false, true) => {
                let index = payload
                    .ok_or_else(|| DemoError::intent(token, format!("expected {kind}:INDEX")))?;
                Operation {
                    kind,
                    index: Some(parse_index(token, index)?),
                    value: None,
                }
            }
            (false, false) => {
                if payload.is_some() {
                    return Err(DemoError::intent(token, format!("{kind} takes no payload")));
                }
                Operation {
                    kind,
                    index: None,
                    value: None,
                }
            }
        };
        Ok(Self::Start(op))
    }
}

fn parse_value(token: &str, raw: &str) -> Result<i64, DemoError> {
    raw.trim()
        .parse()
        .map_err(|_| DemoError::intent(token, format!("`{raw}` is not an integer value")))
}

fn parse_index(token: &str, raw: &str) -> Result<usize, DemoError> {
    raw.trim()
        .parse()
        .map_err(|_| DemoError::intent(token, format!("`{raw}` is not an index")))
}

/// Parse every token, stopping at the first bad one.
///
/// # Errors
///
/// [`DemoError::InvalidIntent`] naming the offending token.
pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Intent>, DemoError> {
    tokens.iter().map(|t| t.as_ref().parse()).collect()
}
