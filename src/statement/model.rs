//! Statement records and summaries.
//!
//! Field names follow the API's PascalCase JSON. Missing fields take their
//! default so partial payloads still load.

use serde::{Deserialize, Serialize};

use super::Time;

/// Every statement fetched in one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AccountStatements {
    pub combined: Vec<AccountStatement>,
}

/// Statement of one account in one currency over a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AccountStatement {
    pub account: String,
    pub currency: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(rename = "StatementID")]
    pub statement_id: i64,
    pub records: Vec<Record>,
    pub summary: Option<StatementSummary>,
}

/// One page of statement records as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StatementResponse {
    pub id: i64,
    pub count: i64,
    pub records: Vec<Record>,
}

/// Totals for a statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StatementSummary {
    pub global_summary: GlobalSummary,
    pub daily_summaries: Vec<DailySummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GlobalSummary {
    pub account_number: String,
    pub currency: String,
    pub start_date: Time,
    pub end_date: Time,
    pub period_start_date: Time,
    pub period_end_date: Time,
    pub in_amount: f64,
    pub in_amount_base: f64,
    pub in_rate: f64,
    pub out_amount: f64,
    pub out_amount_base: f64,
    pub out_rate: f64,
    pub credit_sum: f64,
    pub debit_sum: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DailySummary {
    pub balance: f64,
    pub balance_base: f64,
    pub credit_sum: f64,
    pub debit_sum: f64,
    pub rate: f64,
    pub entry_count: i64,
    pub date: Time,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AccountBalance {
    pub available_balance: f64,
    pub current_balance: f64,
}

/// Sender or beneficiary of a transfer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PartyDetails {
    pub name: String,
    pub inn: String,
    pub account_number: String,
    pub bank_code: String,
    pub bank_name: String,
}

/// One statement entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Record {
    pub entry_date: Time,
    pub entry_document_number: String,
    pub entry_account_number: String,
    pub entry_amount_debit: f64,
    pub entry_amount_debit_base: f64,
    pub entry_amount_credit: f64,
    pub entry_amount_credit_base: f64,
    pub entry_amount_base: f64,
    pub entry_amount: f64,
    pub entry_comment: String,
    pub entry_department: String,
    pub entry_account_point: String,
    pub document_product_group: String,
    pub document_value_date: Time,
    pub sender_details: PartyDetails,
    pub beneficiary_details: PartyDetails,
    pub document_treasury_code: String,
    pub document_nomination: String,
    pub document_information: String,
    pub document_source_amount: f64,
    pub document_source_currency: String,
    pub document_destination_amount: f64,
    pub document_destination_currency: String,
    pub document_receive_date: Time,
    pub document_branch: String,
    pub document_department: String,
    pub document_actual_date: Time,
    pub document_expiry_date: Time,
    pub document_rate_limit: f64,
    pub document_rate: f64,
    pub document_registration_rate: f64,
    pub document_sender_institution: String,
    pub document_intermediary_institution: String,
    pub document_beneficiary_institution: String,
    pub document_payee: String,
    pub document_correspondent_account_number: String,
    pub document_correspondent_bank_code: String,
    pub document_correspondent_bank_name: String,
    pub document_key: f64,
    pub entry_id: f64,
    pub document_payer_name: String,
    pub document_payer_inn: String,
    pub doc_comment: String,
}

crate::localize_fields!(AccountStatements { combined });
crate::localize_fields!(AccountStatement {
    account,
    currency,
    start_date,
    end_date,
    statement_id,
    records,
    summary,
});
crate::localize_fields!(StatementResponse { id, count, records });
crate::localize_fields!(StatementSummary {
    global_summary,
    daily_summaries,
});
crate::localize_fields!(GlobalSummary {
    account_number,
    currency,
    start_date,
    end_date,
    period_start_date,
    period_end_date,
    in_amount,
    in_amount_base,
    in_rate,
    out_amount,
    out_amount_base,
    out_rate,
    credit_sum,
    debit_sum,
});
crate::localize_fields!(DailySummary {
    balance,
    balance_base,
    credit_sum,
    debit_sum,
    rate,
    entry_count,
    date,
});
crate::localize_fields!(AccountBalance {
    available_balance,
    current_balance,
});
crate::localize_fields!(PartyDetails {
    name,
    inn,
    account_number,
    bank_code,
    bank_name,
});
crate::localize_fields!(Record {
    entry_date,
    entry_document_number,
    entry_account_number,
    entry_amount_debit,
    entry_amount_debit_base,
    entry_amount_credit,
    entry_amount_credit_base,
    entry_amount_base,
    entry_amount,
    entry_comment,
    entry_department,
    entry_account_point,
    document_product_group,
    document_value_date,
    sender_details,
    beneficiary_details,
    document_treasury_code,
    document_nomination,
    document_information,
    document_source_amount,
    document_source_currency,
    document_destination_amount,
    document_destination_currency,
    document_receive_date,
    document_branch,
    document_department,
    document_actual_date,
    document_expiry_date,
    document_rate_limit,
    document_rate,
    document_registration_rate,
    document_sender_institution,
    document_intermediary_institution,
    document_beneficiary_institution,
    document_payee,
    document_correspondent_account_number,
    document_correspondent_bank_code,
    document_correspondent_bank_name,
    document_key,
    entry_id,
    document_payer_name,
    document_payer_inn,
    doc_comment,
});
