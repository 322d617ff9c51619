//! In-memory ports for exercising commands without a hub, a disk or a user.

use crate::cache::Cache;
use crate::cloud::Cloud;
use crate::config::Config;
use crate::context::{Context, Ports};
use crate::error::{LumenError, Result};
use crate::hub::{Hub, Session};
use crate::prompt::{Prompt, PromptRequest};
use crate::store::Store;
use crate::types::{CloudScene, Group, HubInfo, Light, LightState, LightStateDelta, Scene};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Hub
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct HubState {
    pub hubs: Vec<HubInfo>,
    pub lights: BTreeMap<String, Light>,
    pub scenes: BTreeMap<String, Scene>,
    pub groups: BTreeMap<String, Group>,
    pub pair_error: Option<String>,
    pub fail_scenes: bool,
    pub failing_lights: Vec<String>,
    pub calls: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeHub(pub Rc<RefCell<HubState>>);

impl FakeHub {
    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }

    fn record(&self, call: String) {
        self.0.borrow_mut().calls.push(call);
    }
}

impl Hub for FakeHub {
    fn discover(&self) -> Result<Vec<HubInfo>> {
        self.record("discover".to_string());
        Ok(self.0.borrow().hubs.clone())
    }

    fn pair(&self, address: &str) -> Result<String> {
        self.record(format!("pair {address}"));
        match &self.0.borrow().pair_error {
            Some(description) => Err(LumenError::Hub {
                code: 101,
                description: description.clone(),
            }),
            None => Ok("paired-user".to_string()),
        }
    }

    fn lights(&self, _session: &Session) -> Result<BTreeMap<String, Light>> {
        self.record("lights".to_string());
        Ok(self.0.borrow().lights.clone())
    }

    fn scenes(&self, _session: &Session) -> Result<BTreeMap<String, Scene>> {
        self.record("scenes".to_string());
        let state = self.0.borrow();
        if state.fail_scenes {
            return Err(LumenError::Hub {
                code: 1,
                description: "unauthorized user".to_string(),
            });
        }
        Ok(state.scenes.clone())
    }

    fn groups(&self, _session: &Session) -> Result<BTreeMap<String, Group>> {
        self.record("groups".to_string());
        Ok(self.0.borrow().groups.clone())
    }

    fn set_light_state(
        &self,
        _session: &Session,
        id: &str,
        state: &LightStateDelta,
    ) -> Result<()> {
        self.record(format!("set_state {id} {state}"));
        let mut hub = self.0.borrow_mut();
        if hub.failing_lights.iter().any(|l| l == id) {
            return Err(LumenError::Hub {
                code: 201,
                description: format!("light {id} is not reachable"),
            });
        }
        let light = hub
            .lights
            .get_mut(id)
            .ok_or_else(|| LumenError::UnknownLight(id.to_string()))?;
        if let Some(on) = state.on {
            light.state.on = on;
        }
        if let Some(bri) = state.bri {
            light.state.bri = bri;
        }
        if let Some(hue) = state.hue {
            light.state.hue = hue;
        }
        if let Some(sat) = state.sat {
            light.state.sat = sat;
        }
        Ok(())
    }

    fn set_light_name(&self, _session: &Session, id: &str, name: &str) -> Result<()> {
        self.record(format!("set_name {id} {name}"));
        let mut hub = self.0.borrow_mut();
        let light = hub
            .lights
            .get_mut(id)
            .ok_or_else(|| LumenError::UnknownLight(id.to_string()))?;
        light.name = name.to_string();
        Ok(())
    }

    fn activate_scene(&self, _session: &Session, id: &str) -> Result<()> {
        self.record(format!("activate {id}"));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StoreState {
    pub config: Option<String>,
    pub cache: Option<String>,
    pub cache_saves: usize,
}

#[derive(Clone, Default)]
pub struct MemoryStore(pub Rc<RefCell<StoreState>>);

impl MemoryStore {
    pub fn config(&self) -> Config {
        self.load_config().unwrap()
    }

    pub fn cache(&self) -> Cache {
        self.load_cache().unwrap()
    }

    pub fn cache_saves(&self) -> usize {
        self.0.borrow().cache_saves
    }

    pub fn corrupt_config(&self) {
        self.0.borrow_mut().config = Some("{\"IPAddress\":".to_string());
    }

    pub fn corrupt_cache(&self) {
        self.0.borrow_mut().cache = Some("not json".to_string());
    }
}

impl Store for MemoryStore {
    fn load_config(&self) -> Result<Config> {
        match &self.0.borrow().config {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Config::default()),
        }
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        self.0.borrow_mut().config = Some(serde_json::to_string(config)?);
        Ok(())
    }

    fn load_cache(&self) -> Result<Cache> {
        match &self.0.borrow().cache {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Cache::default()),
        }
    }

    fn save_cache(&self, cache: &Cache) -> Result<()> {
        let mut state = self.0.borrow_mut();
        state.cache = Some(serde_json::to_string(cache)?);
        state.cache_saves += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PromptState {
    pub answers: VecDeque<Option<Vec<String>>>,
    pub requests: Vec<PromptRequest>,
    pub messages: Vec<String>,
}

/// Replays queued answers; an empty queue behaves like the user cancelling.
#[derive(Clone, Default)]
pub struct ScriptedPrompt(pub Rc<RefCell<PromptState>>);

impl ScriptedPrompt {
    pub fn answer(&self, values: &[&str]) {
        self.0
            .borrow_mut()
            .answers
            .push_back(Some(values.iter().map(|v| v.to_string()).collect()));
    }

    pub fn cancel(&self) {
        self.0.borrow_mut().answers.push_back(None);
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().messages.clone()
    }

    pub fn requests(&self) -> Vec<PromptRequest> {
        self.0.borrow().requests.clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, request: &PromptRequest) -> Result<Option<Vec<String>>> {
        let mut state = self.0.borrow_mut();
        state.requests.push(request.clone());
        Ok(state.answers.pop_front().flatten())
    }

    fn message(&self, text: &str) -> Result<()> {
        self.0.borrow_mut().messages.push(text.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Cloud
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct CloudState {
    pub scenes: Vec<CloudScene>,
    pub calls: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeCloud(pub Rc<RefCell<CloudState>>);

impl FakeCloud {
    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().calls.clone()
    }
}

impl Cloud for FakeCloud {
    fn login(&self, username: &str, password: &str) -> Result<String> {
        self.0.borrow_mut().calls.push(format!("login {username}"));
        if username == "me" && password == "secret" {
            Ok("cloud-token".to_string())
        } else {
            Err(LumenError::UnexpectedResponse(
                "invalid credentials".to_string(),
            ))
        }
    }

    fn scenes(&self, token: &str) -> Result<Vec<CloudScene>> {
        self.0.borrow_mut().calls.push(format!("scenes {token}"));
        Ok(self.0.borrow().scenes.clone())
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

pub fn light(id: &str, name: &str, on: bool, bri: u8) -> Light {
    Light {
        id: id.to_string(),
        name: name.to_string(),
        state: LightState {
            on,
            bri,
            reachable: true,
            ..Default::default()
        },
    }
}

pub fn scene(id: &str, name: &str, owner: &str, lights: &[&str]) -> Scene {
    Scene {
        id: id.to_string(),
        short_name: name.to_string(),
        owner: owner.to_string(),
        lights: lights.iter().map(|l| l.to_string()).collect(),
    }
}

pub fn group(id: &str, name: &str, lights: &[&str]) -> Group {
    Group {
        id: id.to_string(),
        name: name.to_string(),
        lights: lights.iter().map(|l| l.to_string()).collect(),
    }
}

pub struct Fixture {
    pub hub: FakeHub,
    pub store: MemoryStore,
    pub prompt: ScriptedPrompt,
    pub cloud: FakeCloud,
    pub now: DateTime<Utc>,
}

impl Fixture {
    /// Nothing paired, nothing cached.
    pub fn new() -> Self {
        Self {
            hub: FakeHub::default(),
            store: MemoryStore::default(),
            prompt: ScriptedPrompt::default(),
            cloud: FakeCloud::default(),
            now: Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    /// Paired with a hub that has three lights, a few scenes and two groups.
    /// The cache on disk is empty (and so stale).
    pub fn paired() -> Self {
        let fx = Self::new();
        let mut config = Config::default();
        config.pair("10.0.0.2", "user1");
        fx.store.save_config(&config).unwrap();

        {
            let mut hub = fx.hub.0.borrow_mut();
            for l in [
                light("1", "Desk", true, 200),
                light("2", "Lamp", false, 10),
                light("3", "Ceiling", true, 101),
            ] {
                hub.lights.insert(l.id.clone(), l);
            }
            for s in [
                scene("s1", "Relax", "u1", &["1", "2"]),
                scene("s2", "Relax", "u2", &["2", "1"]),
                scene("s3", "Bright", "u1", &["3"]),
                scene("s4", "Hidden", "none", &["1"]),
            ] {
                hub.scenes.insert(s.id.clone(), s);
            }
            for g in [
                group("1", "Living Room", &["1", "2"]),
                group("2", "Office", &["3"]),
            ] {
                hub.groups.insert(g.id.clone(), g);
            }
        }
        fx
    }

    /// Snapshot the hub into the stored cache, refreshed ten seconds ago.
    pub fn with_fresh_cache(self) -> Self {
        self.with_cache_age(Duration::seconds(10))
    }

    pub fn with_cache_age(self, age: Duration) -> Self {
        let mut cache = Cache::default();
        {
            let hub = self.hub.0.borrow();
            cache.replace(
                self.now - age,
                hub.lights.clone(),
                hub.scenes.clone(),
                hub.groups.clone(),
            );
        }
        self.store.save_cache(&cache).unwrap();
        self.store.0.borrow_mut().cache_saves = 0;
        self
    }

    pub fn open(&self) -> Context {
        let now = self.now;
        Context::open(Ports {
            store: Box::new(self.store.clone()),
            hub: Box::new(self.hub.clone()),
            cloud: Box::new(self.cloud.clone()),
            prompt: Box::new(self.prompt.clone()),
        })
        .with_clock(move || now)
    }

    pub fn hub_calls(&self) -> Vec<String> {
        self.hub.calls()
    }
}
