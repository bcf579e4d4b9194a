//! Payment submission input

use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Accepted payment channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Telebirr,
    Cbe,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Telebirr => "telebirr",
            PaymentMethod::Cbe => "cbe",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "telebirr" => Ok(PaymentMethod::Telebirr),
            "cbe" => Ok(PaymentMethod::Cbe),
            _ => Err(ValidationError::InvalidValue {
                field: "paymentMethod".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// A receipt that has already been stored, plus what the payer typed in
#[derive(Debug, Clone)]
pub struct PaymentSubmission {
    pub receipt_path: String,
    pub method: String,
    pub amount: f64,
    pub payer_phone_number: String,
}
