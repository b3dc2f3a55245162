//! Wire format of the clustering protocol's packets.
//!
//! ```text
//! Beacon    0x01 | neighbors: u16 LE
//! Announce  0x02
//! Subscribe 0x03
//! Report    0x04 | seq: u32 LE
//! ```

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshMessage {
    /// Discovery beacon advertising the sender's current neighbor count.
    Beacon { neighbors: u16 },
    /// The sender is a cluster head.
    Announce,
    /// The sender joins the addressed cluster head.
    Subscribe,
    /// Periodic sensor report from a member to its head.
    Report { seq: u32 },
}

const TAG_BEACON: u8 = 0x01;
const TAG_ANNOUNCE: u8 = 0x02;
const TAG_SUBSCRIBE: u8 = 0x03;
const TAG_REPORT: u8 = 0x04;

impl MeshMessage {
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            MeshMessage::Beacon { neighbors } => {
                let mut buf = vec![TAG_BEACON];
                buf.extend_from_slice(&neighbors.to_le_bytes());
                buf
            }
            MeshMessage::Announce => vec![TAG_ANNOUNCE],
            MeshMessage::Subscribe => vec![TAG_SUBSCRIBE],
            MeshMessage::Report { seq } => {
                let mut buf = vec![TAG_REPORT];
                buf.extend_from_slice(&seq.to_le_bytes());
                buf
            }
        }
    }

    /// Parse a payload.  Unknown tags and short or over-long frames yield
    /// `None`.
    pub fn decode(buf: &[u8]) -> Option<MeshMessage> {
        let (&tag, body) = buf.split_first()?;
        match (tag, body.len()) {
            (TAG_BEACON, 2) => Some(MeshMessage::Beacon {
                neighbors: u16::from_le_bytes([body[0], body[1]]),
            }),
            (TAG_ANNOUNCE, 0) => Some(MeshMessage::Announce),
            (TAG_SUBSCRIBE, 0) => Some(MeshMessage::Subscribe),
            (TAG_REPORT, 4) => Some(MeshMessage::Report {
                seq: u32::from_le_bytes([body[0], body[1], body[2], body[3]]),
            }),
            _ => None,
        }
    }
}
