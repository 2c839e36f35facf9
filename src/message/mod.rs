//! Message Layer: Descriptor Per Protocol Method
//!
//! Satu MessageDescriptor per request/event, dibangun sekali oleh
//! interface definition dan dibaca concurrent tanpa lock.

mod descriptor;

pub use descriptor::MessageDescriptor;
