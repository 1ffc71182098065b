use serde::{Deserialize, Deserializer, Serialize};

/// A single search hit.
///
/// Field names follow the search API's wire format. `title`, `url` and
/// `author` are nullable upstream (Ask HN posts have no url, for example),
/// so they decode to empty strings rather than failing the whole response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Story {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_comments: u64,
}

/// Response body of a search request. Only the result collection is used.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub hits: Vec<Story>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_decodes_wire_names() {
        let json = r#"{
            "objectID": "42",
            "title": "React",
            "url": "https://reactjs.org/",
            "author": "Jordan Walke",
            "points": 4,
            "num_comments": 3
        }"#;
        let story: Story = serde_json::from_str(json).unwrap();
        assert_eq!(story.object_id, "42");
        assert_eq!(story.title, "React");
        assert_eq!(story.points, 4);
        assert_eq!(story.num_comments, 3);
    }

    #[test]
    fn test_story_null_fields_become_defaults() {
        let json = r#"{"objectID": "7", "title": null, "url": null, "points": null}"#;
        let story: Story = serde_json::from_str(json).unwrap();
        assert!(story.title.is_empty());
        assert!(story.url.is_empty());
        assert!(story.author.is_empty());
        assert_eq!(story.points, 0);
        assert_eq!(story.num_comments, 0);
    }

    #[test]
    fn test_story_without_object_id_is_rejected() {
        let json = r#"{"title": "no id"}"#;
        assert!(serde_json::from_str::<Story>(json).is_err());
    }

    #[test]
    fn test_search_response_ignores_extra_fields() {
        let json = r#"{"hits": [{"objectID": "1"}], "nbHits": 1, "page": 0}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.hits.len(), 1);
        assert_eq!(response.hits[0].object_id, "1");
    }
}
