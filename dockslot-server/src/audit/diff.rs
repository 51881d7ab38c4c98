//! 预订时间线 JSON diff 计算
//!
//! 通过比较更新前后的 JSON 值，自动生成字段变更差异，
//! 作为 booking_log 的结构化 details 落盘。

use serde::Serialize;
use serde_json::{Value, json};

/// 不进入 diff 的字段（每次写都会变的元数据）
const EXCLUDE_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

/// 字段变更记录
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FieldChange {
    /// 字段名
    pub field: String,
    /// 变更前的值
    pub from: Value,
    /// 变更后的值
    pub to: Value,
}

/// 比较更新前后的实体，生成字段级 diff
///
/// 返回 `{"changes": [{field, from, to}, ...]}`；无变化时 changes 为空数组。
pub fn create_diff<T: Serialize>(old: &T, new: &T) -> Value {
    let old_value = serde_json::to_value(old).unwrap_or(Value::Null);
    let new_value = serde_json::to_value(new).unwrap_or(Value::Null);

    let mut changes: Vec<FieldChange> = Vec::new();

    if let (Value::Object(old_map), Value::Object(new_map)) = (&old_value, &new_value) {
        for (key, old_field) in old_map {
            if EXCLUDE_FIELDS.contains(&key.as_str()) {
                continue;
            }
            let new_field = new_map.get(key).unwrap_or(&Value::Null);
            if old_field != new_field {
                changes.push(FieldChange {
                    field: key.clone(),
                    from: old_field.clone(),
                    to: new_field.clone(),
                });
            }
        }
    }

    json!({ "changes": changes })
}

/// 实体快照（创建事件的 details）
pub fn create_snapshot<T: Serialize>(entity: &T) -> Value {
    let mut value = serde_json::to_value(entity).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        for field in EXCLUDE_FIELDS {
            map.remove(*field);
        }
    }
    json!({ "snapshot": value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: i64,
        guest_name: String,
        party_size: i64,
        updated_at: i64,
    }

    #[test]
    fn diff_reports_only_changed_fields() {
        let old = Row {
            id: 1,
            guest_name: "Ann".into(),
            party_size: 4,
            updated_at: 100,
        };
        let new = Row {
            id: 1,
            guest_name: "Ann".into(),
            party_size: 6,
            updated_at: 200,
        };
        let diff = create_diff(&old, &new);
        let changes = diff["changes"].as_array().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0]["field"], "party_size");
        assert_eq!(changes[0]["from"], 4);
        assert_eq!(changes[0]["to"], 6);
    }

    #[test]
    fn snapshot_excludes_metadata() {
        let row = Row {
            id: 1,
            guest_name: "Ann".into(),
            party_size: 4,
            updated_at: 100,
        };
        let snap = create_snapshot(&row);
        assert!(snap["snapshot"].get("id").is_none());
        assert!(snap["snapshot"].get("updated_at").is_none());
        assert_eq!(snap["snapshot"]["guest_name"], "Ann");
    }
}
