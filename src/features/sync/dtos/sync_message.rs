use serde::{Deserialize, Serialize};

use crate::features::pharmacies::dtos::PharmacyResponseDto;

/// Wire format of every message pushed over the sync WebSocket.
///
/// Serializes as a JSON object with a `type` discriminator, e.g.
/// `{"type":"PHARMACY_DATA_UPDATED","data":[...],"timestamp":"..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SyncMessage {
    /// The dataset has been replaced. `data` carries the freshly recomputed
    /// current-week set, not the raw import.
    #[serde(rename = "PHARMACY_DATA_UPDATED")]
    PharmacyDataUpdated {
        data: Vec<PharmacyResponseDto>,
        /// RFC-3339 timestamp of the broadcast.
        timestamp: String,
    },
    /// One-time advisory message sent to a subscriber on join; carries no
    /// data.
    #[serde(rename = "CONNECTION_ESTABLISHED")]
    ConnectionEstablished { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_data_updated_wire_shape() {
        let msg = SyncMessage::PharmacyDataUpdated {
            data: vec![PharmacyResponseDto {
                id: 7,
                name: "Pharmacie Centrale".to_string(),
                location: "Centre-ville".to_string(),
                phone: "+22512345678".to_string(),
                whatsapp: "+22512345678".to_string(),
                latitude: None,
                longitude: None,
                created_at: Utc::now(),
            }],
            timestamp: "2024-01-01T08:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "PHARMACY_DATA_UPDATED");
        assert_eq!(json["timestamp"], "2024-01-01T08:00:00+00:00");
        assert_eq!(json["data"][0]["id"], 7);
        assert_eq!(json["data"][0]["name"], "Pharmacie Centrale");
    }

    #[test]
    fn test_connection_established_wire_shape() {
        let msg = SyncMessage::ConnectionEstablished {
            message: "Connexion établie".to_string(),
        };

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "CONNECTION_ESTABLISHED");
        assert_eq!(json["message"], "Connexion établie");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_messages_round_trip_through_clients() {
        // Consumers deserialize on the `type` tag alone.
        let wire = r#"{"type":"CONNECTION_ESTABLISHED","message":"hello"}"#;
        let msg: SyncMessage = serde_json::from_str(wire).unwrap();
        assert!(matches!(msg, SyncMessage::ConnectionEstablished { .. }));
    }
}
