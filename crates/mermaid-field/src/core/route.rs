//! Modal endpoint route
//!
//! A [`ModalRequest`] identifies one field item plus the pan/zoom flag. The
//! presentation selector turns it into a link target and the modal endpoint
//! reconstructs it from the URL the browser followed.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use super::error::{DiagramFieldError, Result};
use super::types::FieldOwner;

/// Path segments preceding the route parameters
pub const MODAL_ROUTE_PREFIX: [&str; 2] = ["mermaid-diagram-field", "modal"];

/// Query parameter carrying the pan/zoom flag
pub const PAN_ZOOM_QUERY_KEY: &str = "pz";

const ROUTE_BASE: &str = "http://localhost/";

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Parameters of one modal open
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModalRequest {
    pub entity_type: String,
    pub entity_id: String,
    pub field_name: String,
    pub delta: usize,
    pub pan_zoom: bool,
}

impl ModalRequest {
    pub fn new(
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        field_name: impl Into<String>,
        delta: usize,
        pan_zoom: bool,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            field_name: field_name.into(),
            delta,
            pan_zoom,
        }
    }

    /// Request for the item at `delta` of the owner's field
    pub fn for_item(owner: &FieldOwner, delta: usize, pan_zoom: bool) -> Self {
        Self::new(
            owner.entity_type.clone(),
            owner.entity_id.clone(),
            owner.field_name.clone(),
            delta,
            pan_zoom,
        )
    }

    /// Root-relative URL of the modal endpoint, with `pz=1` only when pan/zoom is on
    ///
    /// Route parameters are percent-encoded per segment, so any non-empty
    /// value other than `.` and `..` survives [`ModalRequest::from_href`].
    pub fn href(&self) -> String {
        let mut href = String::new();
        let delta = self.delta.to_string();
        let segments = MODAL_ROUTE_PREFIX.into_iter().chain([
            self.entity_type.as_str(),
            self.entity_id.as_str(),
            self.field_name.as_str(),
            delta.as_str(),
        ]);
        for segment in segments {
            href.push('/');
            href.extend(utf8_percent_encode(segment, SEGMENT));
        }

        if self.pan_zoom {
            href.push_str(&format!("?{}=1", PAN_ZOOM_QUERY_KEY));
        }
        href
    }

    /// Parse a relative or absolute modal URL
    pub fn from_href(href: &str) -> Result<Self> {
        let base = Url::parse(ROUTE_BASE)
            .map_err(|e| DiagramFieldError::invalid_route(e.to_string()))?;
        let url = Url::options()
            .base_url(Some(&base))
            .parse(href)
            .map_err(|e| DiagramFieldError::invalid_route(format!("{}: {}", href, e)))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        trace!(?segments, "Parsing modal route");

        let params = match segments.as_slice() {
            [first, second, params @ ..] if [*first, *second] == MODAL_ROUTE_PREFIX => params,
            _ => {
                return Err(DiagramFieldError::invalid_route(format!(
                    "{} is not under /{}",
                    url.path(),
                    MODAL_ROUTE_PREFIX.join("/")
                )))
            }
        };

        let [entity_type, entity_id, field_name, delta] = params else {
            return Err(DiagramFieldError::invalid_route(format!(
                "expected 4 route parameters, found {}",
                params.len()
            )));
        };

        let entity_type = route_parameter("entity_type", entity_type)?;
        let entity_id = route_parameter("entity_id", entity_id)?;
        let field_name = route_parameter("field_name", field_name)?;

        let delta = delta
            .parse::<usize>()
            .map_err(|_| DiagramFieldError::invalid_route(format!("invalid delta: {}", delta)))?;

        let pan_zoom = url
            .query_pairs()
            .find(|(key, _)| key == PAN_ZOOM_QUERY_KEY)
            .map(|(_, value)| query_flag(&value))
            .unwrap_or(false);

        Ok(Self::new(entity_type, entity_id, field_name, delta, pan_zoom))
    }
}

/// Boolean reading of a query value: empty and `0` are false, anything else is true
pub fn query_flag(value: &str) -> bool {
    !(value.is_empty() || value == "0")
}

fn route_parameter(name: &str, raw: &str) -> Result<String> {
    let value = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| DiagramFieldError::invalid_route(format!("invalid {}: {}", name, raw)))?;
    if value.is_empty() {
        return Err(DiagramFieldError::invalid_route(format!("empty {}", name)));
    }
    Ok(value.into_owned())
}
