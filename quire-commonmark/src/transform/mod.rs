//! Tree passes run by the processor.
//!
//! - [`links`]: marks external links on the document tree
//! - [`credits`]: attaches image credit comments on the document tree
//! - [`figure`]: wraps credited images in figures on the render tree
pub mod credits;
pub mod figure;
pub mod links;

pub use credits::{
  CREDIT_PROPERTY,
  ImageCredits,
  credit_remainder,
  extract_credits,
  match_credit,
};
pub use figure::{FigureWrapper, build_figure, wrap_credited_images};
pub use links::{
  ExternalLinks,
  annotate_external_links,
  is_external,
  own_domain_from_site_url,
};
