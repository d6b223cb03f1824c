use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One work contract of the logged-in user, as embedded in the portal's
/// landing page. The portal expects it back verbatim in later requests, so
/// fields we don't model are kept in `extra` and serialized back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Employment {
    pub is_passive: bool,
    pub is_default_employment: bool,
    pub employment_id: i64,
    pub person_id: i64,
    pub name: String,
    pub list_name: String,
    pub group_id: i64,
    pub group_name: String,
    pub parent_group_id: i64,
    pub customer_id: i64,
    pub user_name: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub enterprise_name: String,
    pub all_employment_ids: Option<Vec<i64>>,
    pub value_settings: String,
    pub organization_position_id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
