pub use super::attribute::{
    ActiveModel as AttributeActiveModel, Column as AttributeColumn, Entity as Attribute,
    Model as AttributeModel,
};
pub use super::attribute_value::{
    ActiveModel as AttributeValueActiveModel, Column as AttributeValueColumn,
    Entity as AttributeValue, Model as AttributeValueModel,
};
pub use super::project::{
    ActiveModel as ProjectActiveModel, Column as ProjectColumn, Entity as Project,
    Model as ProjectModel,
};
pub use super::timesheet::{
    ActiveModel as TimesheetActiveModel, Column as TimesheetColumn, Entity as Timesheet,
    Model as TimesheetModel,
};
pub use super::user::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as User, Model as UserModel,
};
