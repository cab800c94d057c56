//! Plugin plumbing: conversion into Rolldown's shared plugin handle and the
//! built-in plugins added by [`BuildConfig::build`](crate::BuildConfig::build).

mod externalize;

pub use externalize::{ExternalizeDependenciesPlugin, is_bare_specifier};

use std::sync::Arc;

use rolldown_plugin::{__inner::SharedPluginable, Plugin};

/// Values that can be converted into a `SharedPluginable`.
pub trait IntoPlugin {
    fn into_plugin(self) -> SharedPluginable;
}

pub(crate) struct PluginHandle<P>(P);

/// Wrap a plugin value for [`BuildConfig::plugin`](crate::BuildConfig::plugin).
pub fn plugin<P>(plugin: P) -> impl IntoPlugin
where
    P: Plugin + 'static,
{
    PluginHandle(plugin)
}

impl IntoPlugin for SharedPluginable {
    fn into_plugin(self) -> SharedPluginable {
        self
    }
}

impl<T> IntoPlugin for Arc<T>
where
    T: Plugin + 'static,
{
    fn into_plugin(self) -> SharedPluginable {
        self
    }
}

impl<P> IntoPlugin for PluginHandle<P>
where
    P: Plugin + 'static,
{
    fn into_plugin(self) -> SharedPluginable {
        Arc::new(self.0)
    }
}
