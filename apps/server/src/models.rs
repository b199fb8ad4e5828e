use serde::Deserialize;
use tally_core::expenses::ExpenseInput;

/// An amount as sent by a client: a JSON number or the text typed in a form.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum AmountField {
    Number(serde_json::Number),
    Text(String),
}

impl AmountField {
    fn into_raw(self) -> String {
        match self {
            AmountField::Number(n) => n.to_string(),
            AmountField::Text(s) => s,
        }
    }
}

/// Body of create and edit requests. Missing fields reach validation as empty.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ExpenseRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Option<AmountField>,
}

impl From<ExpenseRequest> for ExpenseInput {
    fn from(request: ExpenseRequest) -> Self {
        ExpenseInput::new(
            request.description,
            request.amount.map(AmountField::into_raw).unwrap_or_default(),
        )
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ReportQuery {
    /// `YYYY-MM-DD`; any day of the wanted week.
    pub date: Option<String>,
}
