use serde::{Deserialize, Serialize};

/// Sentinel for a field the response never populated.
pub const NOT_FOUND: &str = "Not Found";
/// Sentinel used when the whole lookup hit the total-failure marker.
pub const NOT_FOUND_COMPLETE_FAILURE: &str = "Not Found (Complete Failure)";
/// Sentinel used when the safety filter refused the request.
pub const BLOCKED: &str = "Blocked";
/// Sentinel used when the external call failed for any other reason.
pub const ERROR: &str = "Error";

/// The sixteen fixed reference fields, in the order the detail prompt
/// requests them. Responses address each as `"<index>. <label>:"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailField {
    MedicineName,
    ManufacturerName,
    Indications,
    Pharmacology,
    DosageAdministration,
    Interaction,
    Contraindications,
    SideEffects,
    PregnancyLactation,
    PrecautionsWarnings,
    SpecialPopulations,
    OverdoseEffects,
    TherapeuticClass,
    StorageConditions,
    ChemicalStructure,
    PrimaryWebsiteUrl,
}

impl DetailField {
    /// All sixteen fields in prompt order.
    pub const ALL: [DetailField; 16] = [
        DetailField::MedicineName,
        DetailField::ManufacturerName,
        DetailField::Indications,
        DetailField::Pharmacology,
        DetailField::DosageAdministration,
        DetailField::Interaction,
        DetailField::Contraindications,
        DetailField::SideEffects,
        DetailField::PregnancyLactation,
        DetailField::PrecautionsWarnings,
        DetailField::SpecialPopulations,
        DetailField::OverdoseEffects,
        DetailField::TherapeuticClass,
        DetailField::StorageConditions,
        DetailField::ChemicalStructure,
        DetailField::PrimaryWebsiteUrl,
    ];

    /// Label exactly as it appears in the prompt and in responses.
    pub fn label(&self) -> &'static str {
        match self {
            DetailField::MedicineName => "Medicine Name",
            DetailField::ManufacturerName => "Medicine Manufacturer Name",
            DetailField::Indications => "Indications",
            DetailField::Pharmacology => "Pharmacology",
            DetailField::DosageAdministration => "Dosage & Administration",
            DetailField::Interaction => "Interaction",
            DetailField::Contraindications => "Contraindications",
            DetailField::SideEffects => "Side Effects",
            DetailField::PregnancyLactation => "Pregnancy & Lactation",
            DetailField::PrecautionsWarnings => "Precautions & Warnings",
            DetailField::SpecialPopulations => "Use in Special Populations",
            DetailField::OverdoseEffects => "Overdose Effects",
            DetailField::TherapeuticClass => "Therapeutic Class",
            DetailField::StorageConditions => "Storage Conditions",
            DetailField::ChemicalStructure => "Chemical Structure (Molecular Formula)",
            DetailField::PrimaryWebsiteUrl => "Primary Website URL",
        }
    }

    /// 1-based index used to number the field in prompt and response lines.
    pub fn index(&self) -> usize {
        DetailField::ALL
            .iter()
            .position(|f| f == self)
            .map(|p| p + 1)
            .unwrap_or(0)
    }
}

/// Fixed-shape holder for the sixteen field values.
///
/// Every key is always present — constructed complete rather than patched
/// with defaults after the fact. A value is either response text or one of
/// the sentinels above.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailFields {
    pub medicine_name: String,
    pub manufacturer_name: String,
    pub indications: String,
    pub pharmacology: String,
    pub dosage_administration: String,
    pub interaction: String,
    pub contraindications: String,
    pub side_effects: String,
    pub pregnancy_lactation: String,
    pub precautions_warnings: String,
    pub special_populations: String,
    pub overdose_effects: String,
    pub therapeutic_class: String,
    pub storage_conditions: String,
    pub chemical_structure: String,
    pub primary_website_url: String,
}

impl DetailFields {
    /// All sixteen fields set to the same sentinel value.
    pub fn with_value(value: &str) -> Self {
        Self {
            medicine_name: value.to_string(),
            manufacturer_name: value.to_string(),
            indications: value.to_string(),
            pharmacology: value.to_string(),
            dosage_administration: value.to_string(),
            interaction: value.to_string(),
            contraindications: value.to_string(),
            side_effects: value.to_string(),
            pregnancy_lactation: value.to_string(),
            precautions_warnings: value.to_string(),
            special_populations: value.to_string(),
            overdose_effects: value.to_string(),
            therapeutic_class: value.to_string(),
            storage_conditions: value.to_string(),
            chemical_structure: value.to_string(),
            primary_website_url: value.to_string(),
        }
    }

    pub fn get(&self, field: DetailField) -> &str {
        match field {
            DetailField::MedicineName => &self.medicine_name,
            DetailField::ManufacturerName => &self.manufacturer_name,
            DetailField::Indications => &self.indications,
            DetailField::Pharmacology => &self.pharmacology,
            DetailField::DosageAdministration => &self.dosage_administration,
            DetailField::Interaction => &self.interaction,
            DetailField::Contraindications => &self.contraindications,
            DetailField::SideEffects => &self.side_effects,
            DetailField::PregnancyLactation => &self.pregnancy_lactation,
            DetailField::PrecautionsWarnings => &self.precautions_warnings,
            DetailField::SpecialPopulations => &self.special_populations,
            DetailField::OverdoseEffects => &self.overdose_effects,
            DetailField::TherapeuticClass => &self.therapeutic_class,
            DetailField::StorageConditions => &self.storage_conditions,
            DetailField::ChemicalStructure => &self.chemical_structure,
            DetailField::PrimaryWebsiteUrl => &self.primary_website_url,
        }
    }

    pub fn set(&mut self, field: DetailField, value: String) {
        match field {
            DetailField::MedicineName => self.medicine_name = value,
            DetailField::ManufacturerName => self.manufacturer_name = value,
            DetailField::Indications => self.indications = value,
            DetailField::Pharmacology => self.pharmacology = value,
            DetailField::DosageAdministration => self.dosage_administration = value,
            DetailField::Interaction => self.interaction = value,
            DetailField::Contraindications => self.contraindications = value,
            DetailField::SideEffects => self.side_effects = value,
            DetailField::PregnancyLactation => self.pregnancy_lactation = value,
            DetailField::PrecautionsWarnings => self.precautions_warnings = value,
            DetailField::SpecialPopulations => self.special_populations = value,
            DetailField::OverdoseEffects => self.overdose_effects = value,
            DetailField::TherapeuticClass => self.therapeutic_class = value,
            DetailField::StorageConditions => self.storage_conditions = value,
            DetailField::ChemicalStructure => self.chemical_structure = value,
            DetailField::PrimaryWebsiteUrl => self.primary_website_url = value,
        }
    }
}

impl Default for DetailFields {
    fn default() -> Self {
        Self::with_value(NOT_FOUND)
    }
}

/// One cited web source for a medicine. Partially filled entries are valid;
/// at least one attribute is expected to be non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebHighlight {
    pub title: Option<String>,
    pub url: Option<String>,
    pub snippet: Option<String>,
}

/// Parsed lookup result for one medicine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicineRecord {
    /// Name as it appeared in the document, pre-normalization.
    pub original_name: String,
    /// Canonical English name the detail lookup was issued for.
    pub query_name: String,
    pub fields: DetailFields,
    pub highlights: Vec<WebHighlight>,
    /// Populated only when the lookup hit the total-failure marker.
    pub suggested_queries: Vec<String>,
    pub error_message: Option<String>,
}

impl MedicineRecord {
    /// A record with every field set to one sentinel and no highlights.
    pub fn degraded(original_name: &str, query_name: &str, sentinel: &str) -> Self {
        Self {
            original_name: original_name.to_string(),
            query_name: query_name.to_string(),
            fields: DetailFields::with_value(sentinel),
            highlights: Vec::new(),
            suggested_queries: Vec::new(),
            error_message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_fields_in_fixed_order() {
        assert_eq!(DetailField::ALL.len(), 16);
        assert_eq!(DetailField::MedicineName.index(), 1);
        assert_eq!(DetailField::Indications.index(), 3);
        assert_eq!(DetailField::PrimaryWebsiteUrl.index(), 16);
    }

    #[test]
    fn labels_are_distinct() {
        for (i, a) in DetailField::ALL.iter().enumerate() {
            for b in &DetailField::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn default_fields_are_not_found() {
        let fields = DetailFields::default();
        for field in DetailField::ALL {
            assert_eq!(fields.get(field), NOT_FOUND);
        }
    }

    #[test]
    fn set_get_round_trip() {
        let mut fields = DetailFields::default();
        fields.set(DetailField::TherapeuticClass, "Proton Pump Inhibitor".into());
        assert_eq!(
            fields.get(DetailField::TherapeuticClass),
            "Proton Pump Inhibitor"
        );
        // Other fields untouched
        assert_eq!(fields.get(DetailField::Pharmacology), NOT_FOUND);
    }

    #[test]
    fn degraded_record_is_all_sentinel() {
        let record = MedicineRecord::degraded("নাপা", "Napa", BLOCKED);
        for field in DetailField::ALL {
            assert_eq!(record.fields.get(field), BLOCKED);
        }
        assert!(record.highlights.is_empty());
        assert!(record.suggested_queries.is_empty());
    }
}
