//! Query parameters of the company endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};
use crate::external::market::Timeframe;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoricalQuery {
    /// One of `3m`, `ytd`, `1y`, `3y`. Defaults to `1y`.
    #[param(example = "1y")]
    pub timeframe: Option<String>,
}

impl HistoricalQuery {
    pub fn timeframe(&self) -> AppResult<Timeframe> {
        match self.timeframe.as_deref().map(str::trim) {
            None | Some("") => Ok(Timeframe::default()),
            Some(raw) => raw
                .parse()
                .map_err(|message| AppError::BadRequest { message }),
        }
    }
}
