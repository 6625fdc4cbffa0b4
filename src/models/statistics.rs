use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub unique_vehicles: usize,
    pub unique_cards: usize,
    /// Mean milliseconds from entry until the moment of computation.
    pub average_parking_duration: f64,
}
