use anyhow::Context;
use wasm_bindgen::prelude::*;

use crate::{BitSet, Config, Offset};

/// JavaScript handle to a [`BitSet`].
#[wasm_bindgen(js_name = BitSet)]
pub struct JsBitSet {
    inner: BitSet,
}

#[wasm_bindgen(js_class = BitSet)]
#[allow(
    clippy::missing_errors_doc,
    clippy::needless_pass_by_value,
    clippy::wrong_self_convention
)]
impl JsBitSet {
    #[wasm_bindgen(constructor)]
    pub fn new(values: JsValue, config: JsValue) -> Result<JsBitSet, JsValue> {
        let config: Option<Config> = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Failed to deserialize config: {e}")))?;
        let values: Option<Vec<Offset>> = serde_wasm_bindgen::from_value(values)
            .map_err(|e| JsValue::from_str(&format!("Failed to deserialize values: {e}")))?;
        Self::try_new(config.unwrap_or_default(), &values.unwrap_or_default()).map_err(to_js_error)
    }

    pub fn add(&mut self, items: JsValue) -> Result<(), JsValue> {
        let items = offsets(items)?;
        self.try_add(&items).map_err(to_js_error)
    }

    pub fn remove(&mut self, items: JsValue) -> Result<(), JsValue> {
        let items = offsets(items)?;
        self.try_remove(&items).map_err(to_js_error)
    }

    pub fn contains(&self, items: JsValue) -> Result<bool, JsValue> {
        let items = offsets(items)?;
        self.try_contains(&items).map_err(to_js_error)
    }

    pub fn size(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn values(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize values: {e}")))
    }

    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> String {
        self.inner.to_serialized_form()
    }

    #[wasm_bindgen(js_name = fromJSON)]
    pub fn from_json(&mut self, payload: &str) -> Result<(), JsValue> {
        self.try_load(payload).map_err(to_js_error)
    }
}

impl JsBitSet {
    fn try_new(config: Config, values: &[Offset]) -> anyhow::Result<Self> {
        let inner = BitSet::from_values_with_config(config, values)
            .with_context(|| format!("Failed to build bit set from {} values", values.len()))?;
        Ok(Self { inner })
    }

    fn try_add(&mut self, items: &[Offset]) -> anyhow::Result<()> {
        self.inner
            .add(items)
            .with_context(|| format!("Failed to add {} offsets", items.len()))
    }

    fn try_remove(&mut self, items: &[Offset]) -> anyhow::Result<()> {
        self.inner
            .remove(items)
            .with_context(|| format!("Failed to remove {} offsets", items.len()))
    }

    fn try_contains(&self, items: &[Offset]) -> anyhow::Result<bool> {
        self.inner
            .contains(items)
            .context("Failed to test membership")
    }

    fn try_load(&mut self, payload: &str) -> anyhow::Result<()> {
        self.inner
            .from_serialized_form(payload)
            .context("Failed to load serialized bit set")
    }
}

fn offsets(value: JsValue) -> Result<Vec<Offset>, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Expected an array of integer offsets: {e}")))
}

fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

// JsValue needs a wasm host, so these drive the binding through its Rust side.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_config() {
        let set = JsBitSet::try_new(Config::with_memory_limit(1), &[7, 0]).unwrap();
        assert_eq!(set.size(), 2);
        assert_eq!(set.to_json(), "[0,7]");

        let err = JsBitSet::try_new(Config::with_memory_limit(1), &[8]).err().unwrap();
        let message = format!("{err:#}");
        assert!(message.starts_with("Failed to build bit set from 1 values"), "{message}");
        assert!(message.contains("bit offset 8 is out of range [0, 8)"), "{message}");
    }

    #[test]
    fn mutations_round_trip_through_json() {
        let mut set = JsBitSet::try_new(Config::default(), &[]).unwrap();
        assert!(set.is_empty());
        set.try_add(&[3, 1, 2]).unwrap();
        set.try_remove(&[3]).unwrap();
        assert!(set.try_contains(&[1, 2]).unwrap());
        assert!(!set.try_contains(&[3]).unwrap());

        let payload = set.to_json();
        set.clear();
        assert!(set.is_empty());
        set.try_load(&payload).unwrap();
        assert_eq!(set.to_json(), "[1,2]");
    }

    #[test]
    fn errors_carry_context() {
        let mut set = JsBitSet::try_new(Config::default(), &[5]).unwrap();

        let message = format!("{:#}", set.try_add(&[6, -1]).unwrap_err());
        assert!(message.starts_with("Failed to add 2 offsets: bit offset -1"), "{message}");

        let message = format!("{:#}", set.try_load("[+1]").unwrap_err());
        assert!(
            message.starts_with("Failed to load serialized bit set: malformed serialized form"),
            "{message}"
        );
        assert_eq!(set.to_json(), "[5]");
    }
}
