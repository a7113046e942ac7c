//! autocomment engine: generates `///` documentation comments for C#
//! declarations by scanning source line by line.
//!
//! The engine is a pure function from `(lines, config, mode)` to a batch of
//! [`Edit`]s. It performs no I/O; applying the edits, persisting settings and
//! deciding when to run belong to the caller.
//!
//! ```
//! use autocomment_engine::{generate, Edit, Mode, TemplateConfig};
//!
//! let lines = ["public int Count { get; }"];
//! let edits = generate(&lines, &TemplateConfig::default(), Mode::FillMissing);
//! assert_eq!(
//!     edits,
//!     vec![Edit::Insert {
//!         line: 0,
//!         text: "/// <summary>\n/// Gets the Count.\n/// </summary>\n".to_string(),
//!     }]
//! );
//! ```

pub mod config;
pub mod continuation;
pub mod declaration;
pub mod matcher;
pub mod params;
pub mod scan;
pub mod template;

pub use config::{AccessModifier, AccessModifiers, TemplateConfig};
pub use declaration::RecognizedDeclaration;
pub use matcher::{classify, match_declaration, LineClass};
pub use params::{parse_parameters, ParameterDescriptor};
pub use scan::{generate, Edit, Mode, ScanError, Scanner};
pub use template::render;
