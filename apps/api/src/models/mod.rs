pub mod assessment;
pub mod category;
pub mod explanation;

pub use assessment::{AssessmentRow, CategoryResponse, GeminiResponse, PersonData};
pub use category::Category;
pub use explanation::{BulletPoint, ExplanationDocument, Section, Subcategory};
