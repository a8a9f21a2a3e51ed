use std::rc::Rc;
use serde::Serialize;
use lab_web::{ViewerHost, ViewerRunner};
use wasm_bindgen::JsValue;
use crate::catalog::{Catalog, ModuleDescriptor, Tab};
use crate::error::{ChatError, LabError};
use crate::models::ModelKind;
use crate::quiz::Quiz;
use crate::tutor::{ChatService, PendingReply, TutorSession};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Home,
    Module { id: String },
}

/// Current navigation state for the host.
#[derive(Debug, Clone, Serialize)]
pub struct NavState<'a> {
    #[serde(flatten)]
    pub page: &'a Page,
    pub tab: Tab,
    pub model_title: Option<&'a str>,
    pub last_pick: Option<&'a str>,
}

/// Application state: catalog, navigation, quiz, tutor and the 3D viewer.
pub struct ScienceLab {
    catalog: Catalog,
    page: Page,
    tab: Tab,
    quiz: Quiz,
    tutor: Option<TutorSession>,
    viewer: Option<ViewerRunner>,
    /// Requested before the host created the viewer.
    pending_model: Option<ModelKind>,
    last_pick: Option<String>,
}

impl ScienceLab {
    pub fn new() -> Result<Self, LabError> {
        let catalog = Catalog::load()?;
        let quiz = Quiz::new(catalog.questions().to_vec());
        log::info!(
            "catalog: {} modules, {} quiz questions",
            catalog.modules().len(),
            catalog.questions().len()
        );
        Ok(Self {
            catalog,
            page: Page::Home,
            tab: Tab::OhmsLaw,
            quiz,
            tutor: None,
            viewer: None,
            pending_model: None,
            last_pick: None,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Switch to a module's page and tab, loading its model if it has one.
    pub fn open_module(&mut self, id: &str) -> Result<&ModuleDescriptor, LabError> {
        let (tab, model) = {
            let module = self.catalog.module(id)?;
            (module.target_tab, module.model_type)
        };
        self.page = Page::Module { id: id.to_string() };
        self.tab = tab;
        if let Some(kind) = model {
            self.load_model(kind);
        }
        self.catalog.module(id)
    }

    /// Build a model now, or as soon as the viewer exists.
    pub fn load_model(&mut self, kind: ModelKind) {
        self.tab = Tab::Models;
        self.last_pick = None;
        match self.viewer.as_mut() {
            Some(runner) => {
                runner.load(kind.builder());
                self.pending_model = None;
            }
            None => self.pending_model = Some(kind),
        }
    }

    pub fn go_home(&mut self) {
        self.page = Page::Home;
        self.pending_model = None;
        self.last_pick = None;
        if let Some(runner) = self.viewer.as_mut() {
            runner.cleanup();
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn attach_viewer(&mut self, mut runner: ViewerRunner) {
        if let Some(kind) = self.pending_model.take() {
            runner.load(kind.builder());
        }
        self.viewer = Some(runner);
    }

    pub fn viewer(&self) -> Option<&ViewerRunner> {
        self.viewer.as_ref()
    }

    pub fn viewer_mut(&mut self) -> Option<&mut ViewerRunner> {
        self.viewer.as_mut()
    }

    pub fn record_picks(&mut self, names: &[String]) {
        if let Some(name) = names.last() {
            self.last_pick = Some(name.clone());
        }
    }

    pub fn last_pick(&self) -> Option<&str> {
        self.last_pick.as_deref()
    }

    pub fn model_title(&self) -> Option<&str> {
        self.viewer.as_ref().and_then(|r| r.title())
    }

    pub fn nav_state(&self) -> NavState<'_> {
        NavState {
            page: &self.page,
            tab: self.tab,
            model_title: self.model_title(),
            last_pick: self.last_pick(),
        }
    }

    // ---- Quiz ----

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn quiz_mut(&mut self) -> &mut Quiz {
        &mut self.quiz
    }

    // ---- Tutor ----

    /// Start a fresh conversation. Refused while a reply is outstanding.
    pub fn init_tutor(&mut self, service: Rc<dyn ChatService>) -> Result<(), ChatError> {
        if self.tutor.as_ref().is_some_and(TutorSession::is_busy) {
            return Err(ChatError::Busy);
        }
        self.tutor = Some(TutorSession::new(service));
        Ok(())
    }

    pub fn tutor(&self) -> Option<&TutorSession> {
        self.tutor.as_ref()
    }

    pub fn tutor_mut(&mut self) -> Result<&mut TutorSession, ChatError> {
        self.tutor.as_mut().ok_or(ChatError::NotConfigured)
    }

    /// Ask the tutor about a picked object in the current model.
    pub fn ask_about(&mut self, name: &str) -> Result<PendingReply, ChatError> {
        let prompt = TutorSession::prompt_for_pick(name, self.model_title().unwrap_or("3D"));
        let pending = self.tutor_mut()?.submit(&prompt)?;
        self.tab = Tab::Tutor;
        Ok(pending)
    }
}

impl ViewerHost for ScienceLab {
    const NAME: &'static str = "science-lab";

    fn create() -> Result<Self, JsValue> {
        ScienceLab::new().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn attach_viewer(&mut self, runner: ViewerRunner) {
        ScienceLab::attach_viewer(self, runner);
    }

    fn viewer(&mut self) -> Option<&mut ViewerRunner> {
        self.viewer_mut()
    }

    fn on_picks(&mut self, names: &[String]) {
        self.record_picks(names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::FutureExt;
    use glam::Vec2;
    use lab_engine::{InputEvent, ViewerConfig};

    struct Echo;

    impl ChatService for Echo {
        fn send_message(&self, request: crate::tutor::ChatRequest) -> PendingReply {
            let last = request.history.last().map(|t| t.text.clone()).unwrap_or_default();
            futures::future::ready(Ok(format!("echo: {last}"))).boxed_local()
        }
    }

    fn lab_with_viewer() -> ScienceLab {
        let mut lab = ScienceLab::new().unwrap();
        lab.attach_viewer(ViewerRunner::new(ViewerConfig::default()));
        lab
    }

    #[test]
    fn starts_on_home_without_viewer() {
        let lab = ScienceLab::new().unwrap();
        assert_eq!(lab.page(), &Page::Home);
        assert!(lab.viewer().is_none());
        assert!(lab.model_title().is_none());
    }

    #[test]
    fn opening_a_simulation_module_sets_its_tab() {
        let mut lab = lab_with_viewer();
        let module = lab.open_module("em-waves").unwrap();
        assert_eq!(module.title, "Electromagnetic Waves");
        assert_eq!(lab.tab(), Tab::EmWaves);
        assert_eq!(lab.page(), &Page::Module { id: "em-waves".into() });
        assert!(lab.model_title().is_none());
    }

    #[test]
    fn opening_a_model_module_loads_it() {
        let mut lab = lab_with_viewer();
        lab.open_module("dna").unwrap();
        assert_eq!(lab.tab(), Tab::Models);
        assert_eq!(lab.model_title(), Some(crate::models::dna::TITLE));
    }

    #[test]
    fn model_requested_before_viewer_loads_on_attach() {
        let mut lab = ScienceLab::new().unwrap();
        lab.open_module("neon-atom").unwrap();
        assert!(lab.model_title().is_none());
        lab.attach_viewer(ViewerRunner::new(ViewerConfig::default()));
        assert_eq!(lab.model_title(), Some(crate::models::neon::TITLE));
    }

    #[test]
    fn unknown_module_leaves_navigation_alone() {
        let mut lab = lab_with_viewer();
        assert!(matches!(lab.open_module("alchemy"), Err(LabError::UnknownModule(_))));
        assert_eq!(lab.page(), &Page::Home);
    }

    #[test]
    fn going_home_cleans_up_the_viewer() {
        let mut lab = lab_with_viewer();
        lab.open_module("solar-system").unwrap();
        lab.go_home();
        assert_eq!(lab.page(), &Page::Home);
        let runner = lab.viewer().unwrap();
        assert!(runner.viewer().context().active_objects().is_empty());
        assert_eq!(runner.instance_count(), 0);
    }

    #[test]
    fn picks_are_recorded_from_the_runner() {
        let mut lab = lab_with_viewer();
        lab.load_model(ModelKind::SolarSystem);
        let runner = lab.viewer_mut().unwrap();
        // Sun sits at the origin, in the middle of the default viewport.
        runner.push_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        runner.push_input(InputEvent::PointerUp { x: 400.0, y: 300.0 });
        runner.tick(1.0 / 60.0);
        let picks = runner.take_picks();
        lab.record_picks(&picks);
        assert_eq!(lab.last_pick(), Some("Sun"));

        // Top-left corner looks up into empty sky.
        assert!(lab.viewer_mut().unwrap().click(Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn tutor_requires_configuration() {
        let mut lab = lab_with_viewer();
        lab.load_model(ModelKind::SolarSystem);
        assert!(matches!(lab.ask_about("Sun"), Err(ChatError::NotConfigured)));
        assert_eq!(lab.tab(), Tab::Models);
    }

    #[test]
    fn rejected_question_keeps_the_current_tab() {
        let mut lab = lab_with_viewer();
        lab.init_tutor(Rc::new(Echo)).unwrap();
        let _pending = lab.tutor_mut().unwrap().submit("What is a photon?").unwrap();
        lab.set_tab(Tab::Quiz);

        assert!(matches!(lab.ask_about("Sun"), Err(ChatError::Busy)));
        assert_eq!(lab.tab(), Tab::Quiz);
    }

    #[test]
    fn asking_about_a_pick_mentions_the_model() {
        let mut lab = lab_with_viewer();
        lab.load_model(ModelKind::SolarSystem);
        lab.init_tutor(Rc::new(Echo)).unwrap();

        let pending = lab.ask_about("Saturn").unwrap();
        assert_eq!(lab.tab(), Tab::Tutor);
        assert!(matches!(lab.init_tutor(Rc::new(Echo)), Err(ChatError::Busy)));

        let result = block_on(pending);
        let reply = lab.tutor_mut().unwrap().complete(result).text.clone();
        assert!(reply.contains("Saturn"));
        assert!(reply.contains("Solar System"));
    }

    #[test]
    fn nav_state_serializes_flat() {
        let mut lab = lab_with_viewer();
        lab.open_module("ohms-law").unwrap();
        let json = serde_json::to_value(lab.nav_state()).unwrap();
        assert_eq!(json["page"], "module");
        assert_eq!(json["id"], "ohms-law");
        assert_eq!(json["tab"], "ohms-law");
    }
}
