//! Reads a node template into the set of ports the node exposes.

use crate::flow::{FieldKind, Template, TemplateField};

/// Whether the settings affordance is shown, and whether it carries a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsIndicator {
    /// Some field is both advanced and shown.
    pub has_advanced_shown: bool,
    /// Some field is both advanced and required.
    pub has_advanced_required: bool,
}

impl SettingsIndicator {
    /// Scans every field, private ones included.
    pub fn scan(template: &Template) -> Self {
        template
            .iter()
            .map(|f| &f.descriptor)
            .fold(Self::default(), |acc, d| Self {
                has_advanced_shown: acc.has_advanced_shown || (d.advanced && d.show),
                has_advanced_required: acc.has_advanced_required || (d.advanced && d.required),
            })
    }
}

/// The port surface of a template, in template order.
#[derive(Debug, Clone, PartialEq)]
pub struct PortLayout<'a> {
    /// Ordinary left-side input ports.
    pub inputs: Vec<&'a TemplateField>,
    /// Root fields, one aggregate input port each.
    pub roots: Vec<&'a TemplateField>,
    pub settings: SettingsIndicator,
}

impl<'a> PortLayout<'a> {
    pub fn read(template: &'a Template) -> Self {
        let (inputs, roots) = template.iter().fold(
            (Vec::new(), Vec::new()),
            |(mut inputs, mut roots), field| {
                match field.kind {
                    FieldKind::Input => inputs.push(field),
                    FieldKind::Root => roots.push(field),
                    FieldKind::Private | FieldKind::Advanced | FieldKind::Hidden => {}
                }
                (inputs, roots)
            },
        );
        Self {
            inputs,
            roots,
            settings: SettingsIndicator::scan(template),
        }
    }

    /// A node without root fields exposes its own output port instead.
    pub fn exposes_output(&self) -> bool {
        self.roots.is_empty()
    }
}
