use phf::{Set, phf_set};

pub const BACKBONE_NITROGEN: &str = "N";
pub const BACKBONE_CARBON: &str = "C";
pub const BACKBONE_OXYGEN: &str = "O";

/// Names accepted for the alpha carbon. `C1` covers coarse-grained and legacy files
/// that label the trace atom that way.
static ALPHA_CARBON_NAMES: Set<&'static str> = phf_set! {
    "CA", "C1",
};

pub fn is_alpha_carbon(atom_name: &str) -> bool {
    ALPHA_CARBON_NAMES.contains(atom_name.trim())
}
