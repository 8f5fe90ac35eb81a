//! In-memory stand-in for the InvenTree API used by workflow tests.

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    use async_trait::async_trait;
    use inv_api::{ApiError, InventoryApi, Record};
    use inv_core::value_text;
    use serde_json::{Value, json};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Call {
        pub verb: &'static str,
        pub path: String,
        pub body: Value,
    }

    #[derive(Default)]
    struct State {
        collections: HashMap<String, Vec<Record>>,
        next_pk: u64,
        calls: Vec<Call>,
        failures: Vec<(&'static str, String)>,
    }

    /// Collections keyed by endpoint path. POST appends with a fresh pk,
    /// PATCH/PUT on `<collection><pk>/` merge fields, DELETE removes.
    /// Everything else is recorded and answered with an empty object.
    #[derive(Default)]
    pub struct FakeApi {
        state: Mutex<State>,
    }

    impl FakeApi {
        pub fn new() -> Self {
            let api = Self::default();
            api.lock().next_pk = 100;
            api
        }

        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().expect("fake api lock")
        }

        /// Seed a collection. Records without `pk` get one assigned.
        pub fn seed(&self, path: &str, records: Vec<Value>) {
            let mut state = self.lock();
            for value in records {
                let mut record = value.as_object().cloned().expect("seed object");
                if !record.contains_key("pk") {
                    state.next_pk += 1;
                    record.insert("pk".into(), json!(state.next_pk));
                }
                state
                    .collections
                    .entry(path.to_string())
                    .or_default()
                    .push(record);
            }
        }

        /// Make every `verb` request whose path starts with `prefix` fail.
        pub fn fail_on(&self, verb: &'static str, prefix: &str) {
            self.lock().failures.push((verb, prefix.to_string()));
        }

        pub fn records(&self, path: &str) -> Vec<Record> {
            self.lock()
                .collections
                .get(path)
                .cloned()
                .unwrap_or_default()
        }

        pub fn calls(&self) -> Vec<Call> {
            self.lock().calls.clone()
        }

        pub fn calls_to(&self, verb: &str, path: &str) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|call| call.verb == verb && call.path == path)
                .collect()
        }

        fn begin(&self, verb: &'static str, path: &str, body: Value) -> Result<MutexGuard<'_, State>, ApiError> {
            let mut state = self.lock();
            state.calls.push(Call {
                verb,
                path: path.to_string(),
                body,
            });
            if state
                .failures
                .iter()
                .any(|(v, prefix)| *v == verb && path.starts_with(prefix.as_str()))
            {
                return Err(ApiError::Api {
                    status: 500,
                    message: format!("injected failure for {verb} {path}"),
                });
            }
            Ok(state)
        }
    }

    /// Split `part/category/7/` into (`part/category/`, 7).
    fn detail(path: &str) -> Option<(String, u64)> {
        let trimmed = path.strip_suffix('/')?;
        let (collection, pk) = trimmed.rsplit_once('/')?;
        let pk = pk.parse().ok()?;
        Some((format!("{collection}/"), pk))
    }

    /// `*_detail` query flags only expand nested objects in the response.
    fn is_filter(field: &str) -> bool {
        !field.ends_with("_detail")
    }

    fn pk_matches(record: &Record, pk: u64) -> bool {
        record.get("pk").and_then(Value::as_u64) == Some(pk)
    }

    #[async_trait]
    impl InventoryApi for FakeApi {
        async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
            let body = json!(query.iter().map(|(k, v)| ((*k).to_string(), Value::String(v.clone()))).collect::<serde_json::Map<_, _>>());
            let state = self.begin("GET", path, body)?;
            if let Some(records) = state.collections.get(path) {
                let matching: Vec<Value> = records
                    .iter()
                    .filter(|record| {
                        query
                            .iter()
                            .filter(|(field, _)| is_filter(field))
                            .all(|(field, wanted)| {
                                record.get(*field).is_none_or(|v| value_text(v) == *wanted)
                            })
                    })
                    .cloned()
                    .map(Value::Object)
                    .collect();
                return Ok(Value::Array(matching));
            }
            if let Some((collection, pk)) = detail(path) {
                if let Some(record) = state
                    .collections
                    .get(&collection)
                    .and_then(|records| records.iter().find(|r| pk_matches(r, pk)))
                {
                    return Ok(Value::Object(record.clone()));
                }
                return Err(ApiError::Api {
                    status: 404,
                    message: "Not found.".into(),
                });
            }
            Ok(json!([]))
        }

        async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
            let mut state = self.begin("POST", path, body.clone())?;
            let mut record = body.as_object().cloned().unwrap_or_default();
            state.next_pk += 1;
            let pk = state.next_pk;
            record.insert("pk".into(), json!(pk));
            state
                .collections
                .entry(path.to_string())
                .or_default()
                .push(record.clone());
            Ok(Value::Object(record))
        }

        async fn patch(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
            let mut state = self.begin("PATCH", path, body.clone())?;
            merge_detail(&mut state, path, body)
        }

        async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
            let mut state = self.begin("PUT", path, body.clone())?;
            merge_detail(&mut state, path, body)
        }

        async fn delete(&self, path: &str) -> Result<(), ApiError> {
            let mut state = self.begin("DELETE", path, Value::Null)?;
            let (collection, pk) = detail(path).ok_or_else(|| ApiError::Api {
                status: 405,
                message: "Method not allowed".into(),
            })?;
            let records = state.collections.entry(collection).or_default();
            let before = records.len();
            records.retain(|record| !pk_matches(record, pk));
            if records.len() == before {
                return Err(ApiError::Api {
                    status: 404,
                    message: "Not found.".into(),
                });
            }
            Ok(())
        }
    }

    fn merge_detail(state: &mut State, path: &str, body: &Value) -> Result<Value, ApiError> {
        let Some((collection, pk)) = detail(path) else {
            return Ok(json!({}));
        };
        let Some(record) = state
            .collections
            .get_mut(&collection)
            .and_then(|records| records.iter_mut().find(|r| pk_matches(r, pk)))
        else {
            return Ok(json!({}));
        };
        if let Some(fields) = body.as_object() {
            for (key, value) in fields {
                record.insert(key.clone(), value.clone());
            }
        }
        Ok(Value::Object(record.clone()))
    }
}
