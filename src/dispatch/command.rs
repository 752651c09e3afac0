// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The in-stream `LIGHTCONTROL <name> <value>` command.
//!
//! Print files can embed host commands such as `@LIGHTCONTROL Desk 80`.
//! The host strips the `@` and hands the keyword and its parameters to
//! [`execute`]. Other keywords are ignored; malformed commands and unknown
//! light names are logged and otherwise ignored so a print never stops
//! because of a light.

use crate::error::UsageError;
use crate::protocol::Transport;
use crate::types::Percentage;

use super::Dispatcher;

/// Keyword that introduces a light command.
pub const COMMAND_KEYWORD: &str = "LIGHTCONTROL";

/// A parsed light command.
///
/// # Examples
///
/// ```
/// use light_controls_http::dispatch::LightCommand;
///
/// let cmd = LightCommand::parse_line("LIGHTCONTROL Desk 150").unwrap().unwrap();
/// assert_eq!(cmd.name, "Desk");
/// assert_eq!(cmd.value.value(), 100);
///
/// // Other keywords are not ours
/// assert_eq!(LightCommand::parse_line("PAUSE"), Ok(None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightCommand {
    /// Name of the light to set.
    pub name: String,
    /// Target percentage, clamped to `[0, 100]`.
    pub value: Percentage,
}

impl LightCommand {
    /// Parses a full command line, keyword included.
    ///
    /// A leading `@` is accepted. Returns `Ok(None)` if the keyword is not
    /// exactly `LIGHTCONTROL`.
    ///
    /// # Errors
    ///
    /// Returns `UsageError` if the name or value is missing, or the value
    /// is not an integer.
    pub fn parse_line(line: &str) -> Result<Option<Self>, UsageError> {
        let (keyword, parameters) = split_line(line);
        Self::parse(keyword, parameters)
    }

    /// Parses a keyword and its parameter string, as the host delivers them.
    ///
    /// Tokens beyond the value are ignored.
    ///
    /// # Errors
    ///
    /// Returns `UsageError` if the name or value is missing, or the value
    /// is not an integer.
    pub fn parse(keyword: &str, parameters: &str) -> Result<Option<Self>, UsageError> {
        if keyword != COMMAND_KEYWORD {
            return Ok(None);
        }

        let mut tokens = parameters.split_whitespace();
        let (Some(name), Some(value)) = (tokens.next(), tokens.next()) else {
            return Err(UsageError::MissingArguments);
        };

        let (value, _) = Percentage::parse_clamped(value)
            .map_err(|_| UsageError::InvalidValue(value.to_string()))?;

        Ok(Some(Self {
            name: name.to_string(),
            value,
        }))
    }
}

/// Whether a command line was addressed to this handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The keyword was not `LIGHTCONTROL`; nothing was done.
    NotHandled,
    /// The command was consumed, whether or not a light was set.
    Handled,
}

/// Parses and executes a light command against a dispatcher.
///
/// Never fails: usage errors and unknown names are logged.
pub async fn execute<T: Transport>(
    dispatcher: &Dispatcher<T>,
    keyword: &str,
    parameters: &str,
) -> CommandStatus {
    let command = match LightCommand::parse(keyword, parameters) {
        Ok(Some(command)) => command,
        Ok(None) => return CommandStatus::NotHandled,
        Err(e) => {
            tracing::warn!(parameters = %parameters, error = %e, "Ignoring light command");
            return CommandStatus::Handled;
        }
    };

    tracing::debug!(name = %command.name, value = command.value.value(), "Light command");

    if let Err(e) = dispatcher
        .set_value_by_name(&command.name, command.value)
        .await
    {
        tracing::warn!(name = %command.name, error = %e, "Ignoring light command");
    }
    CommandStatus::Handled
}

/// Like [`execute`], for a full command line.
pub async fn execute_line<T: Transport>(dispatcher: &Dispatcher<T>, line: &str) -> CommandStatus {
    let (keyword, parameters) = split_line(line);
    execute(dispatcher, keyword, parameters).await
}

/// Splits `[@]KEYWORD params...` into keyword and parameter string.
fn split_line(line: &str) -> (&str, &str) {
    let line = line.trim();
    let line = line.strip_prefix('@').unwrap_or(line);
    line.split_once(char::is_whitespace).unwrap_or((line, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LightRecord;
    use crate::event::EventBus;
    use crate::test_support::RecordingTransport;

    async fn desk_dispatcher() -> Dispatcher<RecordingTransport> {
        let dispatcher = Dispatcher::new(RecordingTransport::new(), EventBus::new());
        let record = LightRecord::new("Desk", "/desk?b={value}");
        dispatcher
            .lock()
            .await
            .register(record.url_template(), &record);
        dispatcher
    }

    #[test]
    fn parse_clamps_value() {
        let high = LightCommand::parse_line("LIGHTCONTROL Desk 150").unwrap().unwrap();
        assert_eq!(high.value, Percentage::MAX);

        let low = LightCommand::parse_line("LIGHTCONTROL Desk -10").unwrap().unwrap();
        assert_eq!(low.value, Percentage::MIN);
    }

    #[test]
    fn parse_accepts_at_prefix_and_extra_tokens() {
        let cmd = LightCommand::parse_line("@LIGHTCONTROL  Shelf   25 trailing")
            .unwrap()
            .unwrap();
        assert_eq!(cmd.name, "Shelf");
        assert_eq!(cmd.value.value(), 25);
    }

    #[test]
    fn parse_saturates_values_beyond_i64() {
        let high = LightCommand::parse_line("LIGHTCONTROL Desk 99999999999999999999")
            .unwrap()
            .unwrap();
        assert_eq!(high.value, Percentage::MAX);

        let low = LightCommand::parse_line("LIGHTCONTROL Desk -99999999999999999999")
            .unwrap()
            .unwrap();
        assert_eq!(low.value, Percentage::MIN);
    }

    #[test]
    fn parse_rejects_missing_arguments() {
        assert_eq!(
            LightCommand::parse_line("LIGHTCONTROL"),
            Err(UsageError::MissingArguments)
        );
        assert_eq!(
            LightCommand::parse_line("LIGHTCONTROL Desk"),
            Err(UsageError::MissingArguments)
        );
    }

    #[test]
    fn parse_rejects_non_numeric_value() {
        assert_eq!(
            LightCommand::parse_line("LIGHTCONTROL Desk bright"),
            Err(UsageError::InvalidValue("bright".to_string()))
        );
        assert!(LightCommand::parse_line("LIGHTCONTROL Desk 12.5").is_err());
    }

    #[test]
    fn keyword_is_case_sensitive() {
        assert_eq!(LightCommand::parse_line("lightcontrol Desk 10"), Ok(None));
        assert_eq!(LightCommand::parse_line("LIGHTCONTROLX Desk 10"), Ok(None));
        assert_eq!(LightCommand::parse("PAUSE", ""), Ok(None));
    }

    #[tokio::test]
    async fn execute_sets_named_light() {
        let dispatcher = desk_dispatcher().await;

        let status = execute_line(&dispatcher, "LIGHTCONTROL Desk 150").await;

        assert_eq!(status, CommandStatus::Handled);
        assert_eq!(dispatcher.transport().requests(), ["/desk?b=255"]);
        assert_eq!(dispatcher.get_value("/desk?b={value}").await, Percentage::MAX);
    }

    #[tokio::test]
    async fn execute_huge_value_clamps_to_full() {
        let dispatcher = desk_dispatcher().await;

        let status = execute_line(&dispatcher, "LIGHTCONTROL Desk 99999999999999999999").await;

        assert_eq!(status, CommandStatus::Handled);
        assert_eq!(dispatcher.transport().requests(), ["/desk?b=255"]);
    }

    #[tokio::test]
    async fn execute_negative_value_clamps_to_zero() {
        let dispatcher = desk_dispatcher().await;

        execute(&dispatcher, "LIGHTCONTROL", "Desk -10").await;

        assert_eq!(dispatcher.transport().requests(), ["/desk?b=0"]);
    }

    #[tokio::test]
    async fn execute_without_arguments_is_handled_noop() {
        let dispatcher = desk_dispatcher().await;

        let status = execute_line(&dispatcher, "LIGHTCONTROL").await;

        assert_eq!(status, CommandStatus::Handled);
        assert!(dispatcher.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn execute_unknown_name_is_handled_noop() {
        let dispatcher = desk_dispatcher().await;
        let mut rx = dispatcher.subscribe();

        let status = execute_line(&dispatcher, "LIGHTCONTROL UnknownName 50").await;

        assert_eq!(status, CommandStatus::Handled);
        assert!(dispatcher.transport().requests().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn execute_other_keyword_is_not_handled() {
        let dispatcher = desk_dispatcher().await;

        let status = execute(&dispatcher, "PAUSE", "").await;

        assert_eq!(status, CommandStatus::NotHandled);
        assert!(dispatcher.transport().requests().is_empty());
    }
}
