//! The Handler Base & Registry (spec §4.2): a capability-based trait plus an
//! ordered registry that arbitrates by confidence with registry-order
//! tie-break.

pub mod support;

mod ant;
mod docbook;
mod generic;
mod graphml;
mod gpx;
mod hibernate;
mod ivy;
mod junit;
mod kml;
mod log4j;
mod maven_pom;
mod properties_xml;
mod rss;
mod s1000d_dmodule;
mod saml;
mod scap;
mod servicenow;
mod sitemap;
mod soap;
mod spring;
mod struts;
mod svg;
mod wadl;
mod xhtml;
mod xliff;

use crate::datamodel::{DocumentTypeInfo, SpecializedAnalysis};
use crate::error::Result;
use roxmltree::Node;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// The four-operation contract every specialized handler implements, per
/// spec §4.2. All operations are pure with respect to the borrowed tree.
pub trait XmlHandler: Send + Sync {
    /// Stable identity stamped into `metadata.handler_used`.
    fn name(&self) -> &'static str;

    /// Deterministic, side-effect-free capability probe.
    fn can_handle(&self, root: Node, namespaces: &HashMap<String, String>) -> (bool, f64);

    /// Only ever called after a positive `can_handle`.
    fn detect_type(&self, root: Node, namespaces: &HashMap<String, String>) -> DocumentTypeInfo;

    /// May re-walk the tree; must populate every required field.
    fn analyze(&self, root: Node, path: &Path) -> Result<SpecializedAnalysis>;

    /// Domain-specific payload forming `structured_data`.
    fn extract_key_data(&self, root: Node) -> HashMap<String, Value>;
}

/// Minimum confidence a candidate must clear to be considered (spec §4.3 step 2).
pub const DISPATCH_THRESHOLD: f64 = 0.3;

/// An ordered sequence of handler instances. Order only matters as a
/// tiebreaker; primary selection is by confidence.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn XmlHandler>>,
}

impl HandlerRegistry {
    /// Build the default registry: every specialized handler in a fixed
    /// order, with the generic fallback always last.
    pub fn with_default_handlers() -> Self {
        let handlers: Vec<Box<dyn XmlHandler>> = vec![
            Box::new(saml::SamlHandler),
            Box::new(soap::SoapHandler),
            Box::new(scap::ScapHandler),
            Box::new(maven_pom::MavenPomHandler),
            Box::new(ant::AntHandler),
            Box::new(ivy::IvyHandler),
            Box::new(hibernate::HibernateHandler),
            Box::new(kml::KmlHandler),
            Box::new(gpx::GpxHandler),
            Box::new(graphml::GraphMlHandler),
            Box::new(docbook::DocBookHandler),
            Box::new(xliff::XliffHandler),
            Box::new(rss::RssHandler),
            Box::new(spring::SpringHandler),
            Box::new(log4j::Log4jHandler),
            Box::new(properties_xml::PropertiesXmlHandler),
            Box::new(struts::StrutsHandler),
            Box::new(servicenow::ServiceNowHandler),
            Box::new(sitemap::SitemapHandler),
            Box::new(wadl::WadlHandler),
            Box::new(junit::JUnitHandler),
            Box::new(s1000d_dmodule::S1000dModuleHandler),
            Box::new(xhtml::XhtmlHandler),
            Box::new(svg::SvgHandler),
            Box::new(generic::GenericHandler),
        ];
        Self { handlers }
    }

    /// Build a registry from a caller-supplied list. The generic fallback is
    /// appended automatically if the caller didn't include one (spec §6).
    pub fn new(mut custom: Vec<Box<dyn XmlHandler>>) -> Self {
        let has_fallback = custom.iter().any(|h| h.name() == generic::GenericHandler.name());
        if !has_fallback {
            custom.push(Box::new(generic::GenericHandler));
        }
        Self { handlers: custom }
    }

    pub fn handlers(&self) -> &[Box<dyn XmlHandler>] {
        &self.handlers
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_default_handlers()
    }
}
