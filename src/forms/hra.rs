//! HRA optimal rent form.

use serde::{Deserialize, Serialize};

use super::{amount_text, optional, required};
use crate::error::{EngineError, EngineResult};
use crate::models::{CityType, HraInput};

/// The HRA form. Only the basic salary is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraForm {
    /// Annual basic salary.
    #[serde(default, deserialize_with = "amount_text")]
    pub basic_salary: Option<String>,
    /// Annual HRA received; the city percentage of basic when empty.
    #[serde(default, deserialize_with = "amount_text")]
    pub hra_provided: Option<String>,
    /// `"metro"` or anything else for a non-metro city. Metro when absent.
    #[serde(default)]
    pub city_type: Option<String>,
}

impl TryFrom<HraForm> for HraInput {
    type Error = EngineError;

    fn try_from(form: HraForm) -> EngineResult<Self> {
        Ok(HraInput {
            basic_salary: required("basic_salary", &form.basic_salary)?,
            hra_provided: optional("hra_provided", &form.hra_provided)?,
            city: form
                .city_type
                .as_deref()
                .map(CityType::from_form_value)
                .unwrap_or_default(),
        })
    }
}
