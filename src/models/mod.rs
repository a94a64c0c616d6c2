//! Models module for the SDK
//!
//! One plain struct per operator model schema type. Containment is ownership:
//! a child lives in exactly one parent field and moves when reassigned.
//! Mutations made through the generated accessors emit a TRACE event on the
//! `spl_operator_model::notify` target, so a subscriber can observe changes.

#[macro_use]
mod macros;

pub mod common;
pub mod context;
pub mod enums;
pub mod operator_model;
pub mod parameters;
pub mod ports;

use std::fmt::Debug;

pub use common::{Description, JavaOpLibrary, JavaOpManagedLibrary, Library, ManagedLibrary};
pub use context::{
    CodeTemplate, CodeTemplates, Context, CustomOutputFunction, CustomOutputFunctionSet,
    CustomOutputFunctions, Enumeration, Enumerations, IconUri, JavaOpContext,
    JavaOpExecutionSettings, JavaOpLibraryDependencies, JavaOpVmArgs, LibraryDependencies, Metric,
    Metrics, SplExpressionTree,
};
pub use enums::*;
pub use operator_model::{
    COMMON_NAMESPACE, JavaOpModel, OPERATOR_NAMESPACE, OpModel, OperatorLanguage, OperatorModel,
    OperatorModelDocument, XSI_NAMESPACE, default_namespaces,
};
pub use parameters::{JavaOpParameter, JavaOpParameters, OptionalPortScope, Parameter, Parameters, PortScope};
pub use ports::{
    InputPortOpenSet, InputPortSet, InputPorts, JavaOpInputPortOpenSet, JavaOpInputPortSet,
    JavaOpInputPorts, JavaOpOutputPortOpenSet, JavaOpOutputPortSet, JavaOpOutputPorts,
    OutputFunctions, OutputPortOpenSet, OutputPortSet, OutputPorts,
};

/// Tracing target for model change notifications
pub const NOTIFY_TARGET: &str = "spl_operator_model::notify";

pub(crate) fn notify<T: Debug>(class: &'static str, feature: &'static str, old: &T, new: &T) {
    tracing::trace!(
        target: "spl_operator_model::notify",
        class,
        feature,
        old = ?old,
        new = ?new,
        "attribute changed"
    );
}

pub(crate) fn notify_containment(class: &'static str, feature: &'static str, replaced: bool, attached: bool) {
    tracing::trace!(
        target: "spl_operator_model::notify",
        class,
        feature,
        replaced,
        attached,
        "containment changed"
    );
}
