use crate::components::Component;

mod entity_registry_tests;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct A(pub u32);

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct B(pub u32);

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct C(pub u32);

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tag;
