use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A course listing in the catalogue.
///
/// Every field falls back to its zero value when missing from a request body,
/// so an update always replaces the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    /// Identifier, also the key the course is stored under
    pub id: String,
    /// Display name of the course
    pub name: String,
    /// Price in whole currency units
    pub price: i64,
    /// Who is credited for the course; `null` when not provided
    pub author: Option<Author>,
}

/// Person or organization credited for a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub fullname: String,
    pub website: String,
}

impl Course {
    pub fn new(id: &str, name: &str, price: i64, author: Author) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            author: Some(author),
        }
    }

    /// A course without a name carries no usable data.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Decode a request body leniently.
    ///
    /// Only the first JSON value of the body is read. A missing body or one
    /// that is not valid JSON gives an all-zero course. Keys match field names
    /// without regard to case, and a field whose value has the wrong type is
    /// left at zero while the other fields are kept.
    pub fn from_body(body: &[u8]) -> Self {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
        match values.next() {
            Some(Ok(value)) => Self::from_value(&value),
            Some(Err(err)) => {
                tracing::debug!(error = %err, "request body is not JSON, using empty course");
                Self::default()
            }
            None => Self::default(),
        }
    }

    fn from_value(value: &Value) -> Self {
        let mut course = Self::default();
        let Some(fields) = value.as_object() else {
            tracing::debug!("request body is not a JSON object, using empty course");
            return course;
        };

        decode_string(fields, "id", &mut course.id);
        decode_string(fields, "name", &mut course.name);
        if let Some(price) = lookup(fields, "price") {
            match price.as_i64() {
                Some(price) => course.price = price,
                None => tracing::debug!(value = %price, "price is not an integer, ignoring"),
            }
        }
        if let Some(author) = lookup(fields, "author").and_then(Value::as_object) {
            course.author = Some(Author::from_fields(author));
        }

        course
    }
}

/// Field lookup: exact key first, then a case-insensitive match.
fn lookup<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).or_else(|| {
        fields
            .iter()
            .find(|(key, _)| key.to_lowercase() == name)
            .map(|(_, value)| value)
    })
}

fn decode_string(fields: &Map<String, Value>, name: &str, slot: &mut String) {
    match lookup(fields, name) {
        Some(Value::String(value)) => *slot = value.clone(),
        Some(Value::Null) | None => {}
        Some(other) => tracing::debug!(field = name, value = %other, "field is not a string, ignoring"),
    }
}

impl Author {
    pub fn new(fullname: &str, website: &str) -> Self {
        Self {
            fullname: fullname.to_string(),
            website: website.to_string(),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut author = Self::default();
        decode_string(fields, "fullname", &mut author.fullname);
        decode_string(fields, "website", &mut author.website);
        author
    }
}

/// Catalogue loaded at startup.
pub fn seed_catalogue() -> Vec<Course> {
    vec![
        Course::new("1", "ReactJs", 299, Author::new("Facebook", "https://reactjs.org/")),
        Course::new("2", "AngularJs", 199, Author::new("Google", "https://angularjs.org/")),
        Course::new("3", "VueJs", 299, Author::new("Vue", "https://vuejs.org/")),
        Course::new(
            "4",
            "Flask",
            199,
            Author::new("Flask", "https://github.com/pallets/flask"),
        ),
        Course::new(
            "5",
            "Django",
            299,
            Author::new("Facebook", "https://www.djangoproject.com/"),
        ),
    ]
}
