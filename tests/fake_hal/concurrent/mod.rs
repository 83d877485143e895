use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Mutex;

/// One observable action the driver took against a named fake device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    ConfiguredOutput,
    ConfiguredInput,
    SetLow,
    SetHigh,
    DelayMicros(u32),
}

lazy_static! {
    static ref DATA_INDICES_MAP: Mutex<HashMap<&'static str, usize>> = Mutex::new(HashMap::new());
    static ref EVENT_LOGS_MAP: Mutex<HashMap<&'static str, Vec<Event>>> = Mutex::new(HashMap::new());
}

pub fn set_named_value(name: &'static str, value: usize) {
    let mut map = DATA_INDICES_MAP.lock().unwrap();
    map.insert(name, value);
}

pub fn get_and_increment_named_value(name: &str) -> usize {
    let mut map = DATA_INDICES_MAP.lock().unwrap();
    let index = map.get_mut(name).unwrap();
    *index = *index + 1;
    *index - 1
}

pub fn clear_events(name: &'static str) {
    let mut map = EVENT_LOGS_MAP.lock().unwrap();
    map.insert(name, Vec::new());
}

pub fn push_event(name: &'static str, event: Event) {
    let mut map = EVENT_LOGS_MAP.lock().unwrap();
    map.entry(name).or_insert_with(Vec::new).push(event);
}

/// Snapshot of everything recorded under `name`, in order.
pub fn events(name: &str) -> Vec<Event> {
    let map = EVENT_LOGS_MAP.lock().unwrap();
    map.get(name).cloned().unwrap_or_default()
}
