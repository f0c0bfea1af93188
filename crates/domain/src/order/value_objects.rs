//! Value objects recorded on an order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payment method label. No gateway is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// EVC Plus mobile money.
    #[serde(rename = "EVC")]
    Evc,

    /// Sahal mobile money.
    Sahal,

    /// Cash on delivery.
    #[serde(rename = "COD")]
    Cod,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Evc => "EVC",
            PaymentMethod::Sahal => "Sahal",
            PaymentMethod::Cod => "COD",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown payment method '{0}' (expected EVC, Sahal or COD)")]
pub struct UnknownPaymentMethod(pub String);

impl std::str::FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EVC" => Ok(PaymentMethod::Evc),
            "SAHAL" => Ok(PaymentMethod::Sahal),
            "COD" => Ok(PaymentMethod::Cod),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// Where the order goes. Recorded verbatim; validation happens at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub address: String,
    pub city: String,
    pub phone: String,
}

impl DeliveryDetails {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            phone: phone.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_labels_round_trip() {
        for method in [PaymentMethod::Evc, PaymentMethod::Sahal, PaymentMethod::Cod] {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.as_str()));
            assert_eq!(method.as_str().parse::<PaymentMethod>(), Ok(method));
        }
    }

    #[test]
    fn payment_parse_is_case_insensitive_and_closed() {
        assert_eq!("sahal".parse::<PaymentMethod>(), Ok(PaymentMethod::Sahal));
        assert!("visa".parse::<PaymentMethod>().is_err());
    }
}
