//! Coder agents: turn a subtask description into a code artifact.
//!
//! None of these call out to a model. They differ in how much the artifact
//! resembles the description, which is what the similarity scorer measures.

use crewsim_core::agent::Coder;
use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::debug;

/// Returns `"Code for {subtask}"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoCoder;

impl Coder for EchoCoder {
    fn generate(&self, subtask: &str, _rng: &mut dyn RngCore) -> String {
        format!("Code for {subtask}")
    }
}

/// Returns the same artifact for every subtask.
#[derive(Debug, Clone)]
pub struct FixedCoder {
    code: String,
}

impl FixedCoder {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl Coder for FixedCoder {
    fn generate(&self, _subtask: &str, _rng: &mut dyn RngCore) -> String {
        self.code.clone()
    }
}

/// Picks one of a fixed set of implementations at random.
#[derive(Debug, Clone)]
pub struct CannedCoder {
    implementations: Vec<String>,
}

impl CannedCoder {
    /// A coder over the given implementations. An empty list falls back to echoing.
    pub fn new(implementations: Vec<String>) -> Self {
        Self { implementations }
    }

    pub fn implementations(&self) -> &[String] {
        &self.implementations
    }
}

impl Default for CannedCoder {
    fn default() -> Self {
        Self::new(
            [
                "def handler(request):\n    payload = request.json()\n    return {'ok': True, 'data': payload}",
                "function handle(req, res) {\n  const body = req.body;\n  return res.status(200).json(body);\n}",
                "fn handle(input: &str) -> String {\n    let out = input.trim().to_string();\n    return out;\n}",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
    }
}

impl Coder for CannedCoder {
    fn generate(&self, subtask: &str, rng: &mut dyn RngCore) -> String {
        match self.implementations.choose(rng) {
            Some(code) => code.clone(),
            None => {
                debug!(subtask, "no canned implementations, echoing the subtask");
                EchoCoder.generate(subtask, rng)
            }
        }
    }
}

/// Kinds of backend work the template coder recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Auth,
    Payment,
    Profile,
    Cache,
    RateLimit,
    AuditLog,
    Generic,
}

impl TemplateKind {
    /// Classify a subtask by keyword. First match wins.
    pub fn classify(subtask: &str) -> Self {
        let lower = subtask.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if has(&["auth", "login", "oauth", "jwt", "token", "password"]) {
            TemplateKind::Auth
        } else if has(&["payment", "transaction", "stripe", "reconcil", "billing"]) {
            TemplateKind::Payment
        } else if has(&["profile", "avatar", "upload"]) {
            TemplateKind::Profile
        } else if has(&["cache", "caching", "redis"]) {
            TemplateKind::Cache
        } else if has(&["rate limit", "rate-limit", "throttl"]) {
            TemplateKind::RateLimit
        } else if has(&["audit", "logging"]) {
            TemplateKind::AuditLog
        } else {
            TemplateKind::Generic
        }
    }
}

/// Fills a per-domain code template with the subtask.
///
/// Every template assigns and returns, so the default heuristic reviewer
/// approves it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCoder;

impl Coder for TemplateCoder {
    fn generate(&self, subtask: &str, _rng: &mut dyn RngCore) -> String {
        let name = identifier(subtask);
        let doc = subtask.replace('"', "'");
        match TemplateKind::classify(subtask) {
            TemplateKind::Auth => format!(
                "def {name}(credentials):\n    \"\"\"{doc}\"\"\"\n    \
                 user = user_store.find(credentials.username)\n    \
                 if user is None or not verify_password(credentials.password, user.password_hash):\n        \
                 raise AuthenticationFailed(\"invalid credentials\")\n    \
                 token = issue_token(user.id, expires_in=3600)\n    \
                 return {{\"access_token\": token, \"token_type\": \"bearer\"}}"
            ),
            TemplateKind::Payment => format!(
                "def {name}(order, gateway):\n    \"\"\"{doc}\"\"\"\n    \
                 charge = gateway.create_charge(amount=order.total, currency=order.currency)\n    \
                 transaction = Transaction(order_id=order.id, charge_id=charge.id, status=charge.status)\n    \
                 ledger.record(transaction)\n    \
                 return transaction"
            ),
            TemplateKind::Profile => format!(
                "def {name}(user_id, upload):\n    \"\"\"{doc}\"\"\"\n    \
                 profile = profiles.get(user_id)\n    \
                 key = f\"avatars/{{user_id}}/{{upload.filename}}\"\n    \
                 storage.put_object(key, upload.read())\n    \
                 profile.avatar_url = storage.url(key)\n    \
                 return profiles.save(profile)"
            ),
            TemplateKind::Cache => format!(
                "def {name}(key, loader, ttl=300):\n    \"\"\"{doc}\"\"\"\n    \
                 cached = redis.get(key)\n    \
                 if cached is not None:\n        return cached\n    \
                 value = loader()\n    \
                 redis.setex(key, ttl, value)\n    \
                 return value"
            ),
            TemplateKind::RateLimit => format!(
                "def {name}(client_id, limit=100, window=60):\n    \"\"\"{doc}\"\"\"\n    \
                 bucket = f\"rate:{{client_id}}\"\n    \
                 count = redis.incr(bucket)\n    \
                 if count == 1:\n        redis.expire(bucket, window)\n    \
                 return count <= limit"
            ),
            TemplateKind::AuditLog => format!(
                "def {name}(actor, action, resource):\n    \"\"\"{doc}\"\"\"\n    \
                 entry = AuditEntry(actor=actor.id, action=action, resource=resource, at=utcnow())\n    \
                 audit_log.append(entry)\n    \
                 return entry"
            ),
            TemplateKind::Generic => format!(
                "def {name}(request):\n    \"\"\"{doc}\"\"\"\n    \
                 payload = validate(request)\n    \
                 result = service.execute(payload)\n    \
                 return result"
            ),
        }
    }
}

/// Snake-case function name from the first few words of a description.
fn identifier(subtask: &str) -> String {
    let words: Vec<String> = subtask
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .take(4)
        .map(|w| w.to_ascii_lowercase())
        .collect();
    if words.is_empty() {
        return "handle_task".to_string();
    }
    let name = words.join("_");
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("step_{name}")
    } else {
        name
    }
}
