use super::classification::ClassificationRule;
use super::schema::FieldType::{Number, ObjectList, String as Text, StringList};
use super::schema::{DocumentTypeSchema, FieldSpec};

const INVOICE: &[FieldSpec] = &[
    FieldSpec::new("invoice_number", Text),
    FieldSpec::new("date", Text),
    FieldSpec::new("total", Number),
    FieldSpec::new("items", ObjectList),
];

const RECEIPT: &[FieldSpec] = &[
    FieldSpec::new("merchant", Text),
    FieldSpec::new("date", Text),
    FieldSpec::new("total", Number),
    FieldSpec::new("items", ObjectList),
];

const RESUME: &[FieldSpec] = &[
    FieldSpec::new("name", Text),
    FieldSpec::new("email", Text),
    FieldSpec::new("phone", Text),
    FieldSpec::new("skills", StringList),
    FieldSpec::new("experience", StringList),
];

const AADHAAR_CARD: &[FieldSpec] = &[
    FieldSpec::new("name", Text),
    FieldSpec::new("aadhaar_number", Text),
    FieldSpec::new("dob", Text),
    FieldSpec::new("gender", Text),
    FieldSpec::new("address", Text),
];

const PAN_CARD: &[FieldSpec] = &[
    FieldSpec::new("name", Text),
    FieldSpec::new("pan_number", Text),
    FieldSpec::new("dob", Text),
    FieldSpec::new("father_name", Text),
];

const BANK_STATEMENT: &[FieldSpec] = &[
    FieldSpec::new("account_holder", Text),
    FieldSpec::new("account_number", Text),
    FieldSpec::new("bank_name", Text),
    FieldSpec::new("transactions", ObjectList),
];

const COVER_LETTER: &[FieldSpec] = &[
    FieldSpec::new("candidate_name", Text),
    FieldSpec::new("email", Text),
    FieldSpec::new("company_name", Text),
    FieldSpec::new("position", Text),
    FieldSpec::new("summary", Text),
];

const LAB_REPORT: &[FieldSpec] = &[
    FieldSpec::new("patient_name", Text),
    FieldSpec::new("test_name", Text),
    FieldSpec::new("result", Text),
    FieldSpec::new("normal_range", Text),
    FieldSpec::new("date", Text),
];

const PRESCRIPTION: &[FieldSpec] = &[
    FieldSpec::new("doctor_name", Text),
    FieldSpec::new("patient_name", Text),
    FieldSpec::new("medicines", StringList),
    FieldSpec::new("dosage", Text),
    FieldSpec::new("date", Text),
];

const MEDICAL_RECORD: &[FieldSpec] = &[
    FieldSpec::new("patient_name", Text),
    FieldSpec::new("diagnosis", Text),
    FieldSpec::new("treatment", Text),
    FieldSpec::new("doctor_name", Text),
    FieldSpec::new("date", Text),
];

const BUILTIN_SCHEMAS: &[DocumentTypeSchema] = &[
    DocumentTypeSchema {
        name: "invoice",
        title: "Invoice",
        fields: INVOICE,
        rule_description: Some("Contains invoice number, date, and total."),
    },
    DocumentTypeSchema {
        name: "receipt",
        title: "Receipt",
        fields: RECEIPT,
        rule_description: Some("Contains purchase info."),
    },
    DocumentTypeSchema {
        name: "resume",
        title: "Resume",
        fields: RESUME,
        rule_description: Some("Contains skills, education, and experience."),
    },
    DocumentTypeSchema {
        name: "aadhaar",
        title: "AadhaarCard",
        fields: AADHAAR_CARD,
        rule_description: Some("Contains 12-digit Aadhaar number and address."),
    },
    DocumentTypeSchema {
        name: "pan",
        title: "PANCard",
        fields: PAN_CARD,
        rule_description: Some("Contains PAN number and name."),
    },
    DocumentTypeSchema {
        name: "bank",
        title: "BankStatement",
        fields: BANK_STATEMENT,
        rule_description: Some("Contains transaction details and account number."),
    },
    DocumentTypeSchema {
        name: "coverletter",
        title: "CoverLetter",
        fields: COVER_LETTER,
        rule_description: None,
    },
    DocumentTypeSchema {
        name: "labreport",
        title: "LabReport",
        fields: LAB_REPORT,
        rule_description: None,
    },
    DocumentTypeSchema {
        name: "prescription",
        title: "Prescription",
        fields: PRESCRIPTION,
        rule_description: None,
    },
    DocumentTypeSchema {
        name: "medicalrecord",
        title: "MedicalRecord",
        fields: MEDICAL_RECORD,
        rule_description: None,
    },
];

/// Compile-time table of every document type the service knows how to extract.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRegistry {
    schemas: &'static [DocumentTypeSchema],
}

impl SchemaRegistry {
    pub fn builtin() -> Self {
        Self {
            schemas: BUILTIN_SCHEMAS,
        }
    }

    pub fn from_static(schemas: &'static [DocumentTypeSchema]) -> Self {
        Self { schemas }
    }

    pub fn all(&self) -> &'static [DocumentTypeSchema] {
        self.schemas
    }

    pub fn get(&self, name: &str) -> Option<&'static DocumentTypeSchema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Rules handed to the classifier on every call, one per schema that carries a description.
    pub fn classification_rules(&self) -> Vec<ClassificationRule> {
        self.schemas
            .iter()
            .filter_map(|s| {
                s.rule_description
                    .map(|description| ClassificationRule::new(s.name, description))
            })
            .collect()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
