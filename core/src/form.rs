//! Form state: the draft being edited and whether the next submit creates a
//! new product or updates the selected one.

use crate::types::{Draft, Product, ProductId};

/// What the next submit does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Create,
    Edit(ProductId),
}

/// Which draft field a host is writing. Mirrors the three inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Price,
    Description,
}

/// The write a submit will perform, fixed at the moment the submit is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(Draft),
    Update(ProductId, Draft),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    draft: Draft,
    mode: Mode,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn selected_id(&self) -> Option<&ProductId> {
        match &self.mode {
            Mode::Create => None,
            Mode::Edit(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Edit(_))
    }

    /// Load `product` into the draft and select it.
    pub fn begin_edit(&mut self, product: &Product) {
        self.draft = Draft::from(product);
        self.mode = Mode::Edit(product.id.clone());
    }

    /// Clear the draft and drop any selection.
    pub fn begin_create(&mut self) {
        self.draft = Draft::default();
        self.mode = Mode::Create;
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.draft.name = value,
            Field::Price => self.draft.price = value,
            Field::Description => self.draft.description = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.draft.name,
            Field::Price => &self.draft.price,
            Field::Description => &self.draft.description,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set(Field::Name, name);
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.set(Field::Price, price);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.set(Field::Description, description);
    }

    /// Snapshot of the write the current state calls for.
    pub fn submission(&self) -> Submission {
        match &self.mode {
            Mode::Create => Submission::Create(self.draft.clone()),
            Mode::Edit(id) => Submission::Update(id.clone(), self.draft.clone()),
        }
    }
}
