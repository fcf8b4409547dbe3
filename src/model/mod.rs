//! Records mirrored from the backend schema.

mod experience;
mod page;
mod project;
mod tag;
mod technology;
mod user;

pub use experience::{EmploymentType, Experience, ExperienceForm, WorkLocation};
pub use page::Page;
pub use project::{Project, ProjectForm};
pub use tag::{Tag, TagColor, TagForm};
pub use technology::{Technology, TechnologyForm};
pub use user::{Availability, User, UserForm, UserRole};
