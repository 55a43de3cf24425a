//! Descriptive payloads for falling objects (render only)

use serde::Serialize;

/// Name and glyph shown for a falling object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub name: &'static str,
    pub glyph: &'static str,
}

/// Things worth picking up on the district run
pub const PRODUCTS: &[Payload] = &[
    Payload { name: "Coffee", glyph: "☕" },
    Payload { name: "Pizza", glyph: "🍕" },
    Payload { name: "Burger", glyph: "🍔" },
    Payload { name: "Donut", glyph: "🍩" },
    Payload { name: "Gift", glyph: "🎁" },
    Payload { name: "Flowers", glyph: "💐" },
];

/// Things that dent the bumper
pub const OBSTACLES: &[Payload] = &[
    Payload { name: "Cone", glyph: "🚧" },
    Payload { name: "Rock", glyph: "🪨" },
    Payload { name: "Oil", glyph: "🛢" },
    Payload { name: "Bomb", glyph: "💣" },
];
