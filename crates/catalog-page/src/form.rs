use crate::notify::Notifier;
use catalog_store::{CatalogStore, Mirror, PersistOutcome};
use catalog_types::{ProductRecord, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Hidden,
    Visible,
}

/// Input fields of the add-product form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Price,
    ImageUrl,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Description => &self.description,
            FormField::Price => &self.price,
            FormField::ImageUrl => &self.image_url,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Description => self.description = value,
            FormField::Price => self.price = value,
            FormField::ImageUrl => self.image_url = value,
        }
    }
}

/// Which fields must be non-blank for a submit to be accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationPolicy {
    #[default]
    NameOnly,
    NameDescriptionPrice,
}

impl ValidationPolicy {
    fn required(&self) -> &'static [FormField] {
        match self {
            ValidationPolicy::NameOnly => &[FormField::Name],
            ValidationPolicy::NameDescriptionPrice => {
                &[FormField::Name, FormField::Description, FormField::Price]
            }
        }
    }

    /// Alert text shown when validation fails
    pub fn message(&self) -> &'static str {
        match self {
            ValidationPolicy::NameOnly => "Please enter a product name.",
            ValidationPolicy::NameDescriptionPrice => {
                "Please fill in the product name, description and price."
            }
        }
    }

    pub fn accepts(&self, fields: &FormFields) -> bool {
        self.required()
            .iter()
            .all(|field| !fields.get(*field).trim().is_empty())
    }
}

impl fmt::Display for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationPolicy::NameOnly => write!(f, "name-only"),
            ValidationPolicy::NameDescriptionPrice => write!(f, "name-description-price"),
        }
    }
}

impl FromStr for ValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name-only" => Ok(ValidationPolicy::NameOnly),
            "name-description-price" => Ok(ValidationPolicy::NameDescriptionPrice),
            other => Err(format!(
                "unknown validation policy '{}' (expected name-only or name-description-price)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Record added to the store (persisting may still have failed)
    Added {
        id: RecordId,
        persisted: PersistOutcome,
    },
    /// Validation failed; the user was alerted and nothing changed
    Rejected { message: &'static str },
}

/// Add-product form: `Hidden <-> Visible`, submit gated on validation
#[derive(Debug, Clone, Default)]
pub struct FormController {
    state: FormState,
    fields: FormFields,
    policy: ValidationPolicy,
}

impl FormController {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == FormState::Visible
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Flip visibility. Returns the field to focus when the form opens.
    pub fn toggle(&mut self) -> Option<FormField> {
        match self.state {
            FormState::Hidden => {
                self.state = FormState::Visible;
                Some(FormField::Name)
            }
            FormState::Visible => {
                self.state = FormState::Hidden;
                None
            }
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    /// Validate, then add a record built from the trimmed name and the
    /// remaining fields as typed.
    ///
    /// On success the fields are cleared and the form is hidden. On failure
    /// the user is alerted once and the form keeps its state and values.
    pub fn submit<M: Mirror, N: Notifier>(
        &mut self,
        store: &mut CatalogStore<M>,
        notifier: &N,
    ) -> SubmitOutcome {
        if !self.policy.accepts(&self.fields) {
            let message = self.policy.message();
            notifier.alert(message);
            return SubmitOutcome::Rejected { message };
        }

        let id = store.next_id();
        // Only the name is trimmed; the other fields are stored as typed
        let record = ProductRecord::new(id.clone(), self.fields.name.trim())
            .with_description(self.fields.description.as_str())
            .with_price(self.fields.price.as_str())
            .with_image_url(self.fields.image_url.as_str());

        info!(id = %id, name = %record.name, "product submitted");
        let persisted = store.add(record);

        self.fields = FormFields::default();
        self.state = FormState::Hidden;

        SubmitOutcome::Added { id, persisted }
    }
}
