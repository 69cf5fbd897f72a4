//! Gratuity and leave encashment forms.

use serde::{Deserialize, Serialize};

use super::{amount_text, required};
use crate::error::{EngineError, EngineResult};
use crate::models::{GratuityInput, LeaveEncashmentInput, PayBasis};

/// The gratuity form. Both fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratuityForm {
    /// Last drawn monthly basic salary.
    #[serde(default, deserialize_with = "amount_text")]
    pub monthly_basic: Option<String>,
    /// Completed years of service.
    #[serde(default, deserialize_with = "amount_text")]
    pub years_of_service: Option<String>,
}

impl TryFrom<GratuityForm> for GratuityInput {
    type Error = EngineError;

    fn try_from(form: GratuityForm) -> EngineResult<Self> {
        Ok(GratuityInput {
            monthly_basic: required("monthly_basic", &form.monthly_basic)?,
            years_of_service: required("years_of_service", &form.years_of_service)?,
        })
    }
}

/// The leave encashment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEncashmentForm {
    /// Pay figure chosen, `"basic"` unless set.
    #[serde(default)]
    pub pay_type: PayBasis,
    /// Annual pay on the chosen basis.
    #[serde(default, deserialize_with = "amount_text")]
    pub pay_amount: Option<String>,
    /// Leave days to encash.
    #[serde(default, deserialize_with = "amount_text")]
    pub number_of_leaves: Option<String>,
}

impl TryFrom<LeaveEncashmentForm> for LeaveEncashmentInput {
    type Error = EngineError;

    fn try_from(form: LeaveEncashmentForm) -> EngineResult<Self> {
        Ok(LeaveEncashmentInput {
            pay_amount: required("pay_amount", &form.pay_amount)?,
            pay_basis: form.pay_type,
            number_of_leaves: required("number_of_leaves", &form.number_of_leaves)?,
        })
    }
}
