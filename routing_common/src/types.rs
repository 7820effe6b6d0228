//! The data model shared by the caller and the deposit handler
//!
//! Field names are written camelCase and read without regard to ASCII case, so
//! records written by SDKs that keep other property casings still load.
//! Decimals travel as exact JSON numbers, never through `f64`.

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// **A deposit request**
///
/// Input only; it is never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,

    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Fields::read(deserializer)?;
        let id = fields.id()?;
        let amount = fields
            .decimal("amount")?
            .ok_or_else(|| D::Error::missing_field("amount"))?;

        Ok(Transaction { id, amount })
    }
}

/// **An account record, as kept in the state store under its `id`**
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,

    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    pub balance: Decimal,
}

impl Account {
    /// **Opens an account with a zero balance**
    ///
    /// This is what a first deposit for an unseen id starts from.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            balance: Decimal::ZERO,
        }
    }

    /// Adds `amount` to the balance and returns the new balance.
    ///
    /// Returns `None`, leaving the balance untouched, if the sum is not representable.
    pub fn credit(&mut self, amount: Decimal) -> Option<Decimal> {
        self.balance = self.balance.checked_add(amount)?;
        Some(self.balance)
    }
}

impl<'de> Deserialize<'de> for Account {
    /// An absent or `null` balance reads as zero.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Fields::read(deserializer)?;
        let id = fields.id()?;
        let balance = fields.decimal("balance")?.unwrap_or_default();

        Ok(Account { id, balance })
    }
}

/// A JSON object with its keys folded to ASCII lowercase.
///
/// When two keys differ only by case, the later one wins.
struct Fields(Map<String, Value>);

impl Fields {
    fn read<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Fields(
            object
                .into_iter()
                .map(|(key, value)| (key.to_ascii_lowercase(), value))
                .collect(),
        ))
    }

    fn id<E: serde::de::Error>(&mut self) -> Result<String, E> {
        match self.0.remove("id") {
            Some(Value::String(id)) => Ok(id),
            Some(other) => Err(E::custom(format!("id must be a string, not {}", other))),
            None => Err(E::missing_field("id")),
        }
    }

    /// `None` when the field is absent or `null`.
    fn decimal<E: serde::de::Error>(&mut self, name: &'static str) -> Result<Option<Decimal>, E> {
        match self.0.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => rust_decimal::serde::arbitrary_precision::deserialize(value)
                .map(Some)
                .map_err(|err| E::custom(format!("{}: {}", name, err))),
        }
    }
}
