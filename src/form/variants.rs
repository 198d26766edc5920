//! The site's lead forms.
//!
//! Field sets and confirmation copy match what the marketing pages render.
//! Endpoint paths are relative and resolved against the transport base URL.

use super::config::{Endpoint, FormConfig};
use super::field::{FieldSpec, SelectOption};
use crate::error::LeadFormError;

pub const QUOTE: &str = "quote";
pub const FREE_QUOTE: &str = "free-quote";
pub const BUILDER_PARTNERSHIP: &str = "builder-partnership";
pub const REALTOR_PARTNERSHIP: &str = "realtor-partnership";
pub const CONTACT: &str = "contact";

/// Every registered form, in display order.
///
/// # Errors
///
/// Propagates `InvalidConfig` if a built-in config fails validation.
pub fn all() -> Result<Vec<FormConfig>, LeadFormError> {
    Ok(vec![quote()?, free_quote()?, builder_partnership()?, realtor_partnership()?, contact()?])
}

/// Look up a registered form by id. `Ok(None)` for unknown ids.
///
/// # Errors
///
/// Propagates `InvalidConfig` if the matching built-in config fails validation.
pub fn by_id(id: &str) -> Result<Option<FormConfig>, LeadFormError> {
    let config = match id {
        QUOTE => quote()?,
        FREE_QUOTE => free_quote()?,
        BUILDER_PARTNERSHIP => builder_partnership()?,
        REALTOR_PARTNERSHIP => realtor_partnership()?,
        CONTACT => contact()?,
        _ => return Ok(None),
    };
    Ok(Some(config))
}

/// Compact quote modal opened from the navbar and hero.
///
/// # Errors
///
/// Returns `InvalidConfig` if validation fails.
pub fn quote() -> Result<FormConfig, LeadFormError> {
    FormConfig::builder(QUOTE)
        .title("Get Your Free Quote")
        .field(FieldSpec::text("name", "Full Name").required())
        .field(FieldSpec::email("email", "Email").required())
        .field(FieldSpec::tel("phone", "Phone Number").required())
        .field(FieldSpec::select(
            "service",
            "Interested In",
            ["Solar Panels", "Battery Storage", "EV Charging", "All Services"]
                .into_iter()
                .map(SelectOption::plain)
                .collect(),
        ))
        .endpoint(Endpoint::json("/api/sendQuoteForm.php"))
        .success_message("Thank you! We'll reply within 24 hours.")
        .build()
}

/// Full free-quote modal with property type and service selection.
///
/// # Errors
///
/// Returns `InvalidConfig` if validation fails.
pub fn free_quote() -> Result<FormConfig, LeadFormError> {
    FormConfig::builder(FREE_QUOTE)
        .title("Get Your Free Quote")
        .field(FieldSpec::text("name", "Full Name").required())
        .field(FieldSpec::email("email", "Email Address").required())
        .field(FieldSpec::tel("phone", "Phone Number").required())
        .field(
            FieldSpec::select(
                "propertyType",
                "Property Type",
                vec![
                    SelectOption::new("residential", "Residential Home"),
                    SelectOption::new("commercial", "Commercial Building"),
                    SelectOption::new("industrial", "Industrial Facility"),
                    SelectOption::new("farm", "Farm/Rural Property"),
                ],
            )
            .required(),
        )
        .field(
            FieldSpec::select(
                "service",
                "Service Interested In",
                [
                    "Solar Panels Installation",
                    "Battery Storage Systems",
                    "EV Charging",
                    "Commercial Solar Solutions",
                    "Solar System Maintenance",
                    "Not Sure Yet",
                ]
                .into_iter()
                .map(SelectOption::plain)
                .collect(),
            )
            .required(),
        )
        .field(FieldSpec::text_area("message", "Additional Information"))
        .endpoint(Endpoint::json("/api/sendFreeQuoteForm.php"))
        .success_message("Thank you for your inquiry! We will contact you soon.")
        .build()
}

/// Builder partnership program inquiry. Posted as multipart form data.
///
/// # Errors
///
/// Returns `InvalidConfig` if validation fails.
pub fn builder_partnership() -> Result<FormConfig, LeadFormError> {
    FormConfig::builder(BUILDER_PARTNERSHIP)
        .title("Start Your Solar Journey")
        .field(FieldSpec::text("builderName", "Builder / Company Name").required())
        .field(FieldSpec::text("contactPerson", "Contact Person").required())
        .field(FieldSpec::text("position", "Position / Title"))
        .field(FieldSpec::tel("phone", "Phone Number").required())
        .field(FieldSpec::email("email", "Email Address").required())
        .field(FieldSpec::url("website", "Website"))
        .field(FieldSpec::text("locations", "Project Locations"))
        .field(FieldSpec::text("homeVolume", "Annual Home Volume"))
        .endpoint(Endpoint::multipart("/api/sendBuilderForm.php"))
        .success_message(
            "Thank you! Your builder partnership inquiry has been sent successfully. \
             Our partnership team will contact you within 24 hours.",
        )
        .build()
}

/// REALTOR® partnership inquiry.
///
/// # Errors
///
/// Returns `InvalidConfig` if validation fails.
pub fn realtor_partnership() -> Result<FormConfig, LeadFormError> {
    FormConfig::builder(REALTOR_PARTNERSHIP)
        .title("REALTOR® Partnership Inquiry")
        .field(FieldSpec::text("realtorName", "Realtor Name").required())
        .field(FieldSpec::text("company", "Brokerage / Company").required())
        .field(FieldSpec::text("title", "Position / Title").required())
        .field(FieldSpec::tel("cell", "Cell Number").required())
        .field(FieldSpec::email("email", "Email").required())
        .field(FieldSpec::url("website", "Website (optional)"))
        .field(FieldSpec::text("areas", "Primary Service Areas"))
        .field(FieldSpec::text("contactTime", "Preferred Contact Time"))
        .endpoint(Endpoint::json("/api/sendRealtorForm.php"))
        .success_message(
            "Thank you! Your REALTOR® partnership inquiry has been sent successfully. We'll contact you soon!",
        )
        .build()
}

/// General contact form.
///
/// # Errors
///
/// Returns `InvalidConfig` if validation fails.
pub fn contact() -> Result<FormConfig, LeadFormError> {
    FormConfig::builder(CONTACT)
        .title("Send us a Message")
        .field(FieldSpec::text("name", "Full Name").required())
        .field(FieldSpec::email("email", "Email Address").required())
        .field(FieldSpec::tel("phone", "Phone Number"))
        .field(
            FieldSpec::select(
                "subject",
                "Subject",
                vec![
                    SelectOption::new("residential-solar", "Residential Solar Installation"),
                    SelectOption::new("commercial-solar", "Commercial Solar Project"),
                    SelectOption::new("builder-partnership", "Builder Partnership Program"),
                    SelectOption::new("maintenance", "System Maintenance"),
                    SelectOption::new("general-inquiry", "General Inquiry"),
                ],
            )
            .required(),
        )
        .field(FieldSpec::text_area("message", "Message").required())
        .endpoint(Endpoint::json("/api/sendContactForm.php"))
        .success_message("Thank you for your message! We'll get back to you soon.")
        .build()
}

#[cfg(test)]
#[path = "variants_test.rs"]
mod tests;
