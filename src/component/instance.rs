//! Component Instance - Slot storage and the render lifecycle.
//!
//! ```text
//! render_in(target, block)
//!   Unrendered ─► Populating ─(block)─► render_if? ─┬─ true ─► Rendering ─(call)─► Rendered
//!                                                  └─ false ─► Skipped
//! ```
//!
//! The populate block always finishes before any part of `call` runs, for
//! every component in the tree. Slot instances live for one render only:
//! a successful render discards them.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::error::RenderError;
use crate::slots::{Content, DrawFn, Drawable, Renderable, SlotInstance, SlotValue};
use crate::types::{Args, Attributes, Value};

use super::class::ComponentClass;

// =============================================================================
// Render State
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Unrendered,
    Populating,
    Rendering,
    Rendered,
    Skipped,
}

/// Result of the dual slot accessor.
pub enum Access<'a, T> {
    /// No arguments and no content: the current slot value.
    Read(SlotValue<'a, T>),
    /// The call assigned the slot.
    Assigned,
}

impl<T> fmt::Debug for Access<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(value) => f.debug_tuple("Read").field(value).finish(),
            Self::Assigned => f.write_str("Assigned"),
        }
    }
}

enum Occupant<T> {
    One(SlotInstance<T>),
    Many(Vec<SlotInstance<T>>),
}

// =============================================================================
// Component
// =============================================================================

pub struct Component<T> {
    class: Rc<ComponentClass<T>>,
    attributes: Attributes,
    slots: HashMap<String, Occupant<T>>,
    state: RenderState,
    /// Block bound by `call_in`, run by `yield_content`.
    deferred: Option<DrawFn<T>>,
}

impl<T> Component<T> {
    pub(crate) fn new(class: Rc<ComponentClass<T>>, attributes: Attributes) -> Self {
        Self {
            class,
            attributes,
            slots: HashMap::new(),
            state: RenderState::Unrendered,
            deferred: None,
        }
    }

    pub fn class(&self) -> &Rc<ComponentClass<T>> {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Constructor value by name.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Current value of a slot.
    ///
    /// Unset singular slots and undeclared names read as
    /// [`SlotValue::Empty`]; unset collections as an empty
    /// [`SlotValue::Many`].
    pub fn get_slot(&self, name: &str) -> SlotValue<'_, T> {
        let Some(definition) = self.class.slots().get(name) else {
            return SlotValue::Empty;
        };

        match self.slots.get(name) {
            Some(Occupant::One(instance)) => SlotValue::One(instance),
            Some(Occupant::Many(list)) => SlotValue::Many(list),
            None if definition.is_collection() => SlotValue::Many(&[]),
            None => SlotValue::Empty,
        }
    }

    /// Singular occupant of a slot, mutably.
    pub fn slot_mut(&mut self, name: &str) -> Option<&mut SlotInstance<T>> {
        match self.slots.get_mut(name) {
            Some(Occupant::One(instance)) => Some(instance),
            _ => None,
        }
    }

    /// Collection occupants of a slot, mutably. Empty when unset.
    pub fn slots_mut(&mut self, name: &str) -> &mut [SlotInstance<T>] {
        match self.slots.get_mut(name) {
            Some(Occupant::Many(list)) => list.as_mut_slice(),
            _ => Default::default(),
        }
    }
}

impl<T: 'static> Component<T> {
    // =========================================================================
    // Slot assignment
    // =========================================================================

    /// Fill a slot by name or singular alias.
    ///
    /// Resolves the nested component now: direct classes are constructed,
    /// class names are looked up in the declaring class's namespace and
    /// function slots run their callback with this component as receiver
    /// and `target` to draw into right away. Collections append; singular
    /// slots replace.
    pub fn set_slot(
        &mut self,
        name: &str,
        args: Args,
        target: &mut T,
        content: Option<Content<T>>,
    ) -> Result<(), RenderError> {
        let class = Rc::clone(&self.class);
        let definition = class.slots().resolve(name).ok_or_else(|| RenderError::UnknownSlot {
            class: class.name().to_string(),
            slot: name.to_string(),
        })?;

        let mut content = content;
        let nested = match definition.renderable() {
            Renderable::Component(nested) => Some(nested.construct(args)?),
            Renderable::Named(class_name) => {
                let namespace = class.namespace().ok_or_else(|| RenderError::NoNamespace {
                    class: class.name().to_string(),
                    name: class_name.clone(),
                })?;
                Some(namespace.construct(class_name, args)?)
            }
            Renderable::Function(callback) => callback(self, args, target, &mut content)?,
            Renderable::None => {
                if !args.is_empty() {
                    warn!(class = %class.name(), slot = %definition.name(), "slot ignores arguments");
                }
                None
            }
        };

        trace!(
            class = %class.name(),
            slot = %definition.name(),
            kind = definition.renderable().kind(),
            nested = nested.is_some(),
            "assigned slot"
        );

        let instance = SlotInstance::new(definition.name(), class.name(), nested, content);
        if definition.is_collection() {
            let occupant = self
                .slots
                .entry(definition.name().to_string())
                .or_insert_with(|| Occupant::Many(Vec::new()));
            match occupant {
                Occupant::Many(list) => list.push(instance),
                other => *other = Occupant::Many(vec![instance]),
            }
        } else {
            self.slots
                .insert(definition.name().to_string(), Occupant::One(instance));
        }
        Ok(())
    }

    /// Fill a slot with a drawing block.
    pub fn content<F>(&mut self, name: &str, target: &mut T, block: F) -> Result<(), RenderError>
    where
        F: Fn(&mut T) -> Result<(), RenderError> + 'static,
    {
        self.set_slot(name, Args::new(), target, Some(Content::draw(block)))
    }

    /// Fill a slot with a nested component and populate it with `block`.
    pub fn nest<F>(&mut self, name: &str, args: Args, target: &mut T, block: F) -> Result<(), RenderError>
    where
        F: Fn(&mut Component<T>, &mut T) -> Result<(), RenderError> + 'static,
    {
        self.set_slot(name, args, target, Some(Content::populate(block)))
    }

    /// Append one element per argument set, each populated by `block`.
    pub fn set_slots<I, F>(&mut self, name: &str, args: I, target: &mut T, block: F) -> Result<(), RenderError>
    where
        I: IntoIterator<Item = Args>,
        F: Fn(&mut Component<T>, &mut T) -> Result<(), RenderError> + 'static,
    {
        let content = Content::populate(block);
        for args in args {
            self.set_slot(name, args, target, Some(content.clone()))?;
        }
        Ok(())
    }

    /// Read with no arguments and no content, assign otherwise.
    ///
    /// A singular alias always assigns.
    pub fn access(
        &mut self,
        name: &str,
        args: Args,
        target: &mut T,
        content: Option<Content<T>>,
    ) -> Result<Access<'_, T>, RenderError> {
        let slots = self.class.slots();
        if slots.resolve(name).is_none() {
            return Err(RenderError::UnknownSlot {
                class: self.class.name().to_string(),
                slot: name.to_string(),
            });
        }

        if !slots.is_alias(name) && args.is_empty() && content.is_none() {
            return Ok(Access::Read(self.get_slot(name)));
        }
        self.set_slot(name, args, target, content)?;
        Ok(Access::Assigned)
    }

    /// Draw a slot into `target`: the singular occupant or every collection
    /// element in assignment order. Unset slots draw nothing.
    pub fn draw_slot(&mut self, name: &str, target: &mut T) -> Result<(), RenderError> {
        match self.slots.get_mut(name) {
            Some(Occupant::One(instance)) => instance.draw(target),
            Some(Occupant::Many(list)) => {
                for instance in list.iter_mut() {
                    instance.draw(target)?;
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    // =========================================================================
    // Render lifecycle
    // =========================================================================

    /// Populate with `block`, then render unless `render_if` says no.
    pub fn render_in<F>(&mut self, target: &mut T, block: F) -> Result<(), RenderError>
    where
        F: FnOnce(&mut Self, &mut T) -> Result<(), RenderError>,
    {
        self.run(target, Some(block))
    }

    /// Render with nothing to populate beyond slots already assigned.
    pub fn render(&mut self, target: &mut T) -> Result<(), RenderError> {
        self.run(target, None::<fn(&mut Self, &mut T) -> Result<(), RenderError>>)
    }

    /// Render as the nested component of a slot, yielding the slot's content.
    pub(crate) fn render_content(&mut self, target: &mut T, content: Option<Content<T>>) -> Result<(), RenderError> {
        match content {
            None => self.render(target),
            Some(Content::Draw(block)) => self.render_in(target, move |_, target| block(target)),
            Some(Content::Populate(block)) => self.render_in(target, move |this, target| block(this, target)),
        }
    }

    /// Render without populating first. `call` decides where `block` runs by
    /// invoking [`yield_content`](Self::yield_content).
    pub fn call_in<F>(&mut self, target: &mut T, block: F) -> Result<(), RenderError>
    where
        F: Fn(&mut T) -> Result<(), RenderError> + 'static,
    {
        self.deferred = Some(Rc::new(block));
        let result = self.render(target);
        self.deferred = None;
        result
    }

    /// Run the block bound by `call_in`. No-op otherwise.
    pub fn yield_content(&mut self, target: &mut T) -> Result<(), RenderError> {
        match self.deferred.clone() {
            Some(block) => block(target),
            None => Ok(()),
        }
    }

    fn run<F>(&mut self, target: &mut T, block: Option<F>) -> Result<(), RenderError>
    where
        F: FnOnce(&mut Self, &mut T) -> Result<(), RenderError>,
    {
        let class = Rc::clone(&self.class);

        self.state = RenderState::Populating;
        debug!(class = %class.name(), "populating");
        if let Some(block) = block {
            block(self, target)?;
        }

        if !class.should_render(self) {
            self.state = RenderState::Skipped;
            debug!(class = %class.name(), "render skipped");
            self.slots.clear();
            return Ok(());
        }

        self.state = RenderState::Rendering;
        let call = class.call_hook().ok_or_else(|| RenderError::MissingCall {
            class: class.name().to_string(),
        })?;
        debug!(class = %class.name(), "rendering");
        call(self, target)?;

        self.state = RenderState::Rendered;
        self.slots.clear();
        Ok(())
    }
}

impl<T: 'static> Drawable<T> for Component<T> {
    fn draw(&mut self, target: &mut T) -> Result<(), RenderError> {
        self.render(target)
    }
}

impl<T> fmt::Debug for Component<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots: Vec<(&str, usize)> = self
            .slots
            .iter()
            .map(|(name, occupant)| {
                let count = match occupant {
                    Occupant::One(_) => 1,
                    Occupant::Many(list) => list.len(),
                };
                (name.as_str(), count)
            })
            .collect();
        slots.sort();

        f.debug_struct("Component")
            .field("class", &self.class.name())
            .field("attributes", &self.attributes)
            .field("slots", &slots)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::Field;
    use serde_json::json;

    type Target = Vec<String>;

    fn push(target: &mut Target, text: &str) {
        target.push(text.to_string());
    }

    fn box_class() -> Rc<ComponentClass<Target>> {
        ComponentClass::builder("BoxComponent")
            .renders_one("title", ())
            .renders_one("description", ())
            .call(|this, target| {
                push(target, "<<");
                this.draw_slot("title", target)?;
                this.draw_slot("description", target)?;
                push(target, ">>");
                Ok(())
            })
            .build()
            .unwrap()
    }

    fn street_class() -> Rc<ComponentClass<Target>> {
        ComponentClass::builder("StreetComponent")
            .renders_many("cars", ())
            .call(|this, target| {
                for car in this.slots_mut("cars") {
                    push(target, "Car:");
                    car.draw(target)?;
                }
                Ok(())
            })
            .build()
            .unwrap()
    }

    fn text(value: &'static str) -> Content<Target> {
        Content::draw(move |target: &mut Target| {
            push(target, value);
            Ok(())
        })
    }

    #[test]
    fn test_unset_slots() {
        let component = box_class().construct(Args::new()).unwrap();
        assert!(matches!(component.get_slot("title"), SlotValue::Empty));

        let street = street_class().construct(Args::new()).unwrap();
        let cars = street.get_slot("cars");
        assert!(matches!(cars, SlotValue::Many(list) if list.is_empty()));

        // Undeclared names never fail on read
        assert!(matches!(component.get_slot("footer"), SlotValue::Empty));
    }

    #[test]
    fn test_singular_assignment_replaces() {
        let mut component = box_class().construct(Args::new()).unwrap();
        let mut target = Vec::new();
        component.content("title", &mut target, |t| Ok(push(t, "first"))).unwrap();
        component.content("title", &mut target, |t| Ok(push(t, "second"))).unwrap();

        assert_eq!(component.get_slot("title").len(), 1);

        component.render(&mut target).unwrap();
        assert_eq!(target, vec!["<<", "second", ">>"]);
    }

    #[test]
    fn test_collection_assignment_appends() {
        let mut street = street_class().construct(Args::new()).unwrap();
        let mut target = Vec::new();
        street.set_slot("cars", Args::new(), &mut target, Some(text("Ford"))).unwrap();
        street.set_slot("car", Args::new(), &mut target, Some(text("Mercedes"))).unwrap();

        let cars = street.get_slot("cars");
        assert_eq!(cars.len(), 2);
        assert!(cars.iter().all(|car| car.slot() == "cars" && car.owner() == "StreetComponent"));

        street.render(&mut target).unwrap();
        assert_eq!(target, vec!["Car:", "Ford", "Car:", "Mercedes"]);
    }

    #[test]
    fn test_unknown_slot_assignment() {
        let mut component = box_class().construct(Args::new()).unwrap();
        let err = component
            .set_slot("footer", Args::new(), &mut Vec::new(), Some(text("x")))
            .unwrap_err();

        assert!(matches!(
            err,
            RenderError::UnknownSlot { ref class, ref slot } if class == "BoxComponent" && slot == "footer"
        ));
    }

    #[test]
    fn test_access_reads_or_assigns() {
        let mut street = street_class().construct(Args::new()).unwrap();
        let mut target = Vec::new();

        let read = street.access("cars", Args::new(), &mut target, None).unwrap();
        assert!(matches!(read, Access::Read(value) if value.is_empty()));

        let assigned = street
            .access("cars", Args::new(), &mut target, Some(text("Ford")))
            .unwrap();
        assert!(matches!(assigned, Access::Assigned));

        // The alias assigns even without content
        let assigned = street.access("car", Args::new(), &mut target, None).unwrap();
        assert!(matches!(assigned, Access::Assigned));
        assert_eq!(street.get_slot("cars").len(), 2);

        assert!(street.access("bikes", Args::new(), &mut target, None).is_err());
    }

    #[test]
    fn test_lifecycle_states() {
        let mut component = box_class().construct(Args::new()).unwrap();
        assert_eq!(component.state(), RenderState::Unrendered);

        let mut target = Vec::new();
        component
            .render_in(&mut target, |this, target| {
                assert_eq!(this.state(), RenderState::Populating);
                this.content("title", target, |t| Ok(push(t, "TITLE")))
            })
            .unwrap();

        assert_eq!(component.state(), RenderState::Rendered);
        assert!(component.get_slot("title").is_empty());
    }

    #[test]
    fn test_render_if_skips_call() {
        let class = ComponentClass::<Target>::builder("OptionalComponent")
            .option(Field::new("visible").with_default(true))
            .renders_one("title", ())
            .render_if(|this| this.attributes().flag("visible"))
            .call(|this, target| this.draw_slot("title", target))
            .build()
            .unwrap();

        let mut component = class.construct(Args::new().with("visible", false)).unwrap();
        let mut target = Vec::new();
        component
            .render_in(&mut target, |this, target| {
                push(target, "populated");
                this.content("title", target, |t| Ok(push(t, "TITLE")))
            })
            .unwrap();

        assert_eq!(component.state(), RenderState::Skipped);
        assert_eq!(target, vec!["populated"]);
    }

    #[test]
    fn test_missing_call() {
        let class = ComponentClass::<Target>::builder("EmptyComponent").build().unwrap();
        let err = class
            .construct(Args::new())
            .unwrap()
            .render(&mut Vec::new())
            .unwrap_err();

        assert_eq!(err.code(), "RENDER_MISSING_CALL");
    }

    #[test]
    fn test_errors_propagate_without_rollback() {
        let mut component = box_class().construct(Args::new()).unwrap();
        let mut target = Vec::new();

        let err = component
            .render_in(&mut target, |_, target| {
                push(target, "partial");
                Err(RenderError::Failed("boom".into()))
            })
            .unwrap_err();

        assert!(matches!(err, RenderError::Failed(message) if message == "boom"));
        assert_eq!(target, vec!["partial"]);
        assert_eq!(component.state(), RenderState::Populating);
    }

    #[test]
    fn test_function_slot_receives_owner() {
        let class = ComponentClass::<Target>::builder("GreetingComponent")
            .option(Field::new("name").with_default("world"))
            .renders_one(
                "greeting",
                Renderable::function(|owner: &mut Component<Target>, args: Args, _: &mut Target, content: &mut Option<Content<Target>>| {
                    let name = owner.attributes().str("name").unwrap_or_default().to_string();
                    let punctuation = args
                        .named()
                        .get("punctuation")
                        .and_then(Value::as_str)
                        .unwrap_or(".")
                        .to_string();
                    *content = Some(Content::draw(move |target: &mut Target| {
                        push(target, &format!("Hello {name}{punctuation}"));
                        Ok(())
                    }));
                    Ok(None)
                }),
            )
            .call(|this, target| this.draw_slot("greeting", target))
            .build()
            .unwrap();

        let mut target = Vec::new();
        ComponentClass::render(&class, Args::new().with("name", "Ada"), &mut target, |this, target| {
            this.set_slot("greeting", Args::new().with("punctuation", "!"), target, None)
        })
        .unwrap();

        assert_eq!(target, vec!["Hello Ada!"]);
    }

    #[test]
    fn test_set_slots_shares_block() {
        let item = ComponentClass::<Target>::builder("ItemComponent")
            .option("label")
            .call(|this, target| {
                push(target, this.attributes().str("label").unwrap_or_default());
                Ok(())
            })
            .build()
            .unwrap();
        let list = ComponentClass::<Target>::builder("ListComponent")
            .renders_many("items", &item)
            .call(|this, target| this.draw_slot("items", target))
            .build()
            .unwrap();

        let mut target = Vec::new();
        ComponentClass::render(&list, Args::new(), &mut target, |this, target| {
            this.set_slots(
                "items",
                ["a", "b", "c"].map(|label| Args::new().with("label", label)),
                target,
                |item, target| {
                    push(target, &format!("populate {}", item.attributes().str("label").unwrap_or_default()));
                    Ok(())
                },
            )
        })
        .unwrap();

        assert_eq!(
            target,
            vec!["populate a", "a", "populate b", "b", "populate c", "c"]
        );
    }

    #[test]
    fn test_call_in_yields_where_call_decides() {
        let class = ComponentClass::<Target>::builder("VerticalSpaceComponent")
            .call(|this, target| {
                push(target, "Up here");
                this.yield_content(target)?;
                push(target, "Down there");
                Ok(())
            })
            .build()
            .unwrap();

        let mut target = Vec::new();
        let mut component = class.construct(Args::new()).unwrap();
        component
            .call_in(&mut target, |target| Ok(push(target, "In between")))
            .unwrap();

        assert_eq!(target, vec!["Up here", "In between", "Down there"]);

        // Without call_in there is nothing to yield
        target.clear();
        component.render(&mut target).unwrap();
        assert_eq!(target, vec!["Up here", "Down there"]);
    }

    #[test]
    fn test_slot_mut_reaches_nested() {
        let label = ComponentClass::<Target>::builder("LabelComponent")
            .param("text")
            .call(|this, target| {
                push(target, this.attributes().str("text").unwrap_or_default());
                Ok(())
            })
            .build()
            .unwrap();
        let mut component = ComponentClass::<Target>::builder("CardComponent")
            .renders_one("label", &label)
            .build()
            .unwrap()
            .construct(Args::new())
            .unwrap();

        component
            .set_slot("label", Args::new().arg("Hi"), &mut Vec::new(), None)
            .unwrap();

        let slot = component.slot_mut("label").unwrap();
        assert_eq!(slot.attr("text").unwrap(), &json!("Hi"));
        assert_eq!(slot.nested_mut().map(|nested| nested.class_name()), Some("LabelComponent"));
    }
}
