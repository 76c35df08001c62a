use serde_json::Value;

use crate::parser::rows::{AccountRow, VendorRow};
use crate::sources::accounting::{Account, Contact};

/// Cast an upstream scalar to text. Null becomes the empty string.
pub fn as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Cast an upstream scalar to a flag using truthiness: zero, empty, `"0"`
/// and `"false"` are false.
pub fn as_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            account_id: as_text(&account.account_id),
            code: as_text(&account.code),
            name: as_text(&account.name),
            account_type: as_text(&account.account_type),
            class: as_text(&account.class),
            status: as_text(&account.status),
            enable_payments_to_account: as_flag(&account.enable_payments_to_account),
        }
    }
}

impl From<&Contact> for VendorRow {
    fn from(contact: &Contact) -> Self {
        Self {
            contact_id: as_text(&contact.contact_id),
            name: as_text(&contact.name),
            email_address: as_text(&contact.email_address),
            is_supplier: as_flag(&contact.is_supplier),
            is_customer: as_flag(&contact.is_customer),
            contact_status: as_text(&contact.contact_status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn account_fields_are_cast_to_declared_types() {
        let account: Account = serde_json::from_value(json!({
            "AccountID": "ebd06280-af70-4bed-97c6-7451a454ad85",
            "Code": 200,
            "Name": "Sales",
            "Type": "REVENUE",
            "Class": "REVENUE",
            "Status": "ACTIVE",
            "EnablePaymentsToAccount": 1
        }))
        .unwrap();

        let row = AccountRow::from(&account);
        assert_eq!(row.code, "200");
        assert_eq!(row.account_type, "REVENUE");
        assert!(row.enable_payments_to_account);
    }

    #[test]
    fn missing_fields_become_empty_or_false() {
        let row = VendorRow::from(&Contact::default());
        assert_eq!(row.contact_id, "");
        assert_eq!(row.email_address, "");
        assert!(!row.is_supplier);
        assert!(!row.is_customer);
    }

    #[test]
    fn flag_truthiness() {
        for truthy in [json!(true), json!(1), json!(2.5), json!("true"), json!("yes"), json!("1")] {
            assert!(as_flag(&truthy), "{} should be true", truthy);
        }
        for falsy in [json!(false), json!(0), json!(0.0), json!(""), json!("0"), json!("FALSE"), json!(null)] {
            assert!(!as_flag(&falsy), "{} should be false", falsy);
        }
    }

    #[test]
    fn row_key_order_is_declaration_order() {
        let row = AccountRow::from(&Account::default());
        let json = serde_json::to_string(&row).unwrap();
        let keys = ["AccountID", "Code", "Name", "Type", "Class", "Status", "EnablePaymentsToAccount"];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(&format!("\"{}\"", k)).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
