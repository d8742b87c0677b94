use serde::Deserialize;
use serde::Serialize;

// one animal as returned by the animals API (or stored in the local data file).
// every key is optional and unknown keys are ignored.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Animal {
    pub name: Option<String>,
    pub locations: Option<Vec<String>>,
    pub taxonomy: Option<Taxonomy>,
    pub characteristics: Option<Characteristics>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    pub scientific_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Characteristics {
    pub diet: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub most_distinctive_feature: Option<String>,
    pub color: Option<String>,
    pub skin_type: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl Animal {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn scientific_name(&self) -> Option<&str> {
        self.taxonomy
            .as_ref()
            .and_then(|t| non_empty(&t.scientific_name))
    }

    pub fn location(&self) -> Option<&str> {
        self.locations
            .as_ref()
            .and_then(|l| l.first())
            .map(|l| l.as_str())
            .filter(|l| !l.is_empty())
    }

    pub fn characteristic(&self, attribute: Attribute) -> Option<&str> {
        let c = self.characteristics.as_ref()?;
        match attribute {
            Attribute::Diet => non_empty(&c.diet),
            Attribute::Type => non_empty(&c.kind),
            Attribute::DistinctiveFeature => non_empty(&c.most_distinctive_feature),
            Attribute::Color => non_empty(&c.color),
            Attribute::SkinType => non_empty(&c.skin_type),
        }
    }
}

// the characteristics a page can be filtered by
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Diet,
    Type,
    DistinctiveFeature,
    Color,
    SkinType,
}

impl Attribute {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "diet" => Some(Self::Diet),
            "type" => Some(Self::Type),
            "most_distinctive_feature" | "feature" => Some(Self::DistinctiveFeature),
            "color" | "colour" => Some(Self::Color),
            "skin_type" | "skin" => Some(Self::SkinType),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Diet => "diet",
            Self::Type => "type",
            Self::DistinctiveFeature => "most_distinctive_feature",
            Self::Color => "color",
            Self::SkinType => "skin_type",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Diet => "Diet",
            Self::Type => "Type",
            Self::DistinctiveFeature => "Distinctive feature",
            Self::Color => "Color",
            Self::SkinType => "Skin type",
        }
    }
}
