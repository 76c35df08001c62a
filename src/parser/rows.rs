use serde::{Deserialize, Serialize};

/// Flat account projection. Field order is the snapshot column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRow {
    #[serde(rename = "AccountID")]
    pub account_id: String,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub account_type: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "EnablePaymentsToAccount")]
    pub enable_payments_to_account: bool,
}

/// Flat supplier contact projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorRow {
    #[serde(rename = "ContactID")]
    pub contact_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "EmailAddress")]
    pub email_address: String,
    #[serde(rename = "IsSupplier")]
    pub is_supplier: bool,
    #[serde(rename = "IsCustomer")]
    pub is_customer: bool,
    #[serde(rename = "ContactStatus")]
    pub contact_status: String,
}
