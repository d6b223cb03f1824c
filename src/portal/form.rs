//! Auto-submittable form extraction.
//!
//! Every identity-provider hop of the login sequence answers with a page
//! whose only job is to POST a form onwards. These helpers pull the target
//! URL and the input fields out of such a page without assuming how many
//! fields there are or in which order they come.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;

static FORM_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("static selector"));
static INPUT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input").expect("static selector"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("form not found: {0}")]
    FormNotFound(&'static str),

    #[error("malformed form: input tag without {0} attribute")]
    MalformedForm(&'static str),
}

/// Name/value pairs of a form, in document order. Duplicate names are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// The first form of a page: where it posts to and what it posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoForm {
    pub action: String,
    pub fields: FormFields,
}

fn first_form(doc: &Html) -> Result<ElementRef<'_>, FormError> {
    doc.select(&FORM_SEL)
        .next()
        .ok_or(FormError::FormNotFound("no form element"))
}

/// Returns the `action` attribute of the first form of the document.
pub fn form_action_url(doc: &Html) -> Result<String, FormError> {
    first_form(doc)?
        .attr("action")
        .map(str::to_string)
        .ok_or(FormError::FormNotFound("form action attribute missing"))
}

/// Returns the name and value of every input tag of the first form.
pub fn form_values(doc: &Html) -> Result<FormFields, FormError> {
    let form = first_form(doc)?;
    let mut values = Vec::new();

    for input in form.select(&INPUT_SEL) {
        let name = input.attr("name").ok_or(FormError::MalformedForm("name"))?;
        let value = input
            .attr("value")
            .ok_or(FormError::MalformedForm("value"))?;
        values.push((name.to_string(), value.to_string()));
    }

    Ok(FormFields(values))
}

/// Parses `body` and extracts its first form in one go.
pub fn extract_form(body: &str) -> Result<AutoForm, FormError> {
    let doc = Html::parse_document(body);
    Ok(AutoForm {
        action: form_action_url(&doc)?,
        fields: form_values(&doc)?,
    })
}
