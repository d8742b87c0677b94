use std::borrow::Cow;

use crate::record::{Animal, Attribute};
use crate::utils;

// restricts a page to the animals whose attribute equals `value` exactly
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub attribute: Attribute,
    pub value: String,
}

impl Filter {
    pub fn matches(&self, animal: &Animal) -> bool {
        animal.characteristic(self.attribute) == Some(self.value.as_str())
    }
}

/// The lines shown on a card, in display order. Absent fields are `None`.
pub fn card_fields(animal: &Animal) -> [(&'static str, Option<&str>); 7] {
    [
        ("Scientific name", animal.scientific_name()),
        ("Diet", animal.characteristic(Attribute::Diet)),
        ("Location", animal.location()),
        ("Type", animal.characteristic(Attribute::Type)),
        (
            "Distinctive feature",
            animal.characteristic(Attribute::DistinctiveFeature),
        ),
        ("Color", animal.characteristic(Attribute::Color)),
        ("Skin type", animal.characteristic(Attribute::SkinType)),
    ]
}

fn text(value: &str, escape: bool) -> Cow<'_, str> {
    if escape {
        Cow::Owned(utils::escape_html(value))
    } else {
        Cow::Borrowed(value)
    }
}

pub fn render_card(animal: &Animal, escape: bool) -> String {
    let mut out = String::new();
    out.push_str("<li class=\"cards__item\">\n");
    if let Some(name) = animal.name() {
        out.push_str(&format!(
            "<div class=\"card__title\">{}</div>\n",
            text(name, escape)
        ));
    }
    out.push_str("<div class=\"card__text\">\n");
    out.push_str("<ul class=\"animal-info\">\n");
    for (label, value) in card_fields(animal) {
        if let Some(value) = value {
            out.push_str(&format!(
                "<li class=\"animal-info__item\"><strong>{}:</strong> {}</li>\n",
                label,
                text(value, escape)
            ));
        }
    }
    out.push_str("</ul>\n");
    out.push_str("</div>\n");
    out.push_str("</li>\n");
    out
}

pub fn matching<'a>(
    animals: &'a [Animal],
    filter: Option<&'a Filter>,
) -> impl Iterator<Item = &'a Animal> + 'a {
    animals
        .iter()
        .filter(move |animal| filter.map_or(true, |f| f.matches(animal)))
}

pub fn serialize_animals(animals: &[Animal], filter: Option<&Filter>, escape: bool) -> String {
    matching(animals, filter)
        .map(|animal| render_card(animal, escape))
        .collect()
}

pub fn not_found_message(query: &str, escape: bool) -> String {
    format!(
        "<h2>The animal \"{}\" doesn't exist.</h2>\n",
        text(query, escape)
    )
}
