//! Mutation write path.
//!
//! Validation and preflight complete before any request is sent. A rejected
//! command never reaches the adapter.

use courtboard_core::{normalize_service_error, CourtCommand, PreflightResult, ThrownError};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::board::BoardService;
use crate::error::ServiceError;
use crate::LOG_TARGET;

/// Minimal response envelope returned by every mutation endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub message: Option<String>,
    /// The full response body.
    pub raw: Value,
}

impl MutationResponse {
    /// Parses a response. Only a boolean `ok: true` is a success; `error`
    /// and `message` are kept when they are strings and ignored otherwise.
    #[must_use]
    pub fn parse(raw: Value) -> Self {
        let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            ok: raw.get("ok").and_then(Value::as_bool).unwrap_or(false),
            error: text("error"),
            message: text("message"),
            raw,
        }
    }
}

/// Runs commands against the backend.
#[derive(Clone)]
pub struct MutationService {
    boards: BoardService,
}

impl MutationService {
    #[must_use]
    pub fn new(boards: BoardService) -> Self {
        Self { boards }
    }

    /// Builds a command from raw UI input, then executes it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] when the input is structurally
    /// invalid, otherwise whatever [`execute`](Self::execute) returns.
    pub async fn submit<C: CourtCommand>(&self, input: &Value) -> Result<MutationResponse, ServiceError> {
        let command = C::build(input)?;
        self.execute(&command).await
    }

    /// Preflights `command` against the current board (when enabled), posts
    /// its payload, and invalidates the cached board on success.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Preflight`] when the command is infeasible,
    /// or [`ServiceError::Domain`] for transport faults and `ok: false`
    /// responses.
    pub async fn execute<C: CourtCommand>(&self, command: &C) -> Result<MutationResponse, ServiceError> {
        let context = self.boards.context(C::NAME);

        if self.boards.config().preflight {
            let board = self.boards.fetch_board(false).await?;
            if let PreflightResult::Failed { errors } = command.preflight(&board) {
                info!(target: LOG_TARGET, command = C::NAME, ?errors, "preflight rejected command");
                return Err(ServiceError::Preflight {
                    command: C::NAME,
                    errors,
                });
            }
        }

        let payload = serde_json::to_value(command.to_payload())
            .map_err(|err| normalize_service_error(ThrownError::Error(err.to_string()), &context))?;

        debug!(target: LOG_TARGET, command = C::NAME, endpoint = C::ENDPOINT, "posting mutation");
        let raw = self
            .boards
            .adapter()
            .post(C::ENDPOINT, payload)
            .await
            .map_err(|err| normalize_service_error(err, &context))
            .inspect_err(|err| {
                warn!(target: LOG_TARGET, command = C::NAME, code = %err.code, error = %err, "mutation transport failed");
            })?;

        let response = MutationResponse::parse(raw);
        if !response.ok {
            let err = normalize_service_error(ThrownError::Payload(response.raw), &context);
            warn!(target: LOG_TARGET, command = C::NAME, code = %err.code, error = %err, "mutation rejected by backend");
            return Err(err.into());
        }

        self.boards.invalidate();
        Ok(response)
    }
}
