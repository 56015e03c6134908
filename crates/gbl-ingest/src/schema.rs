//! GeoBlacklight field schema
//!
//! The fixed table of recognized metadata fields and their required/optional
//! status. The table is a compile-time constant; unknown field names are never
//! required and are never rejected (they pass through the pipeline untouched).

/// A single recognized field and whether it must be present and non-blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

/// Recognized GeoBlacklight fields. Names are unique.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "dc_identifier_s", required: true },
    FieldSpec { name: "dc_rights_s", required: true },
    FieldSpec { name: "dct_provenance_s", required: true },
    FieldSpec { name: "dct_references_s", required: false },
    FieldSpec { name: "dc_creator_sm", required: false },
    FieldSpec { name: "dc_language_sm", required: false },
    FieldSpec { name: "dc_publisher_sm", required: false },
    FieldSpec { name: "dc_type_s", required: false },
    FieldSpec { name: "dct_spatial_sm", required: false },
    FieldSpec { name: "dct_temporal_sm", required: false },
    FieldSpec { name: "dct_issued_dt", required: false },
    FieldSpec { name: "dct_ispartof_sm", required: false },
    FieldSpec { name: "solr_geom", required: true },
    FieldSpec { name: "georss:polygon", required: false },
    FieldSpec { name: "dc_title_s", required: true },
    FieldSpec { name: "dc_description_s", required: false },
    FieldSpec { name: "dc_format_s", required: false },
    FieldSpec { name: "dc_subject_sm", required: false },
    FieldSpec { name: "layer_id_s", required: false },
    FieldSpec { name: "layer_modified_dt", required: false },
    FieldSpec { name: "layer_slug_s", required: true },
    FieldSpec { name: "layer_geom_type_s", required: false },
    FieldSpec { name: "geoblacklight_version", required: true },
];

/// Whether `name` is a recognized field.
pub fn is_known(name: &str) -> bool {
    FIELDS.iter().any(|f| f.name == name)
}

/// Whether `name` is recognized and required. Unknown fields are never required.
pub fn is_required(name: &str) -> bool {
    FIELDS.iter().any(|f| f.name == name && f.required)
}
