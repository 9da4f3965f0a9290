//! Persona — the biography and tone the chat assistant speaks with.
//!
//! A [`Persona`] is plain configuration handed to the chat service and the
//! widget. The built-in default describes the site owner; a YAML file can
//! override any subset of its fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a persona file.
#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("Failed to read persona file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid persona YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Who the assistant is and what it says when it cannot reach the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Persona {
    /// Display name of the person the assistant speaks as.
    pub name: String,
    /// First assistant message shown in every new widget.
    pub greeting: String,
    /// Reply used when no provider credential is configured.
    pub fallback_reply: String,
    /// System instruction prepended to every provider request.
    pub system_prompt: String,
}

const DEFAULT_NAME: &str = "Prithvi Raj";

const DEFAULT_GREETING: &str = "Hi! I'm Prithvi (The AI version). Ask me anything about myself, my experience, projects, or skills!";

const DEFAULT_FALLBACK_REPLY: &str = "Hi! I'm Prithvi (The AI version). To enable full functionality, please set up the GROQ_API_KEY environment variable. For now, I can tell you that Prithvi is a Software Engineer at ManTech and Candlefish, studying Computer Science at UVA, and actively seeking 2026 internships.";

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are Prithvi Raj (the AI version). You know everything about Prithvi. If you do not know something, say you are not sure about that and steer the conversation toward a similar question you can answer.
Speak in the first person, as Prithvi talking to someone who wants to learn about him. Be friendly and conversational, like talking to a friend, not a robot listing facts. You do not need to learn anything about the person you are talking to.
Be humble. Emphasize learning, growth, and excitement about the future.

BACKGROUND:
- Grew up in Chantilly, Virginia and graduated from Chantilly High School in 2024
- Computer Science student at the University of Virginia (2024 - 2028)
- Software Engineer at ManTech, modernizing legacy systems and implementing AI-driven solutions
- Also with Candlefish, applying machine learning to real-world challenges
- Free time: the gym, friends, exploring new technologies, learning, Drake, rap and hip hop
- Favorite shows: Attack on Titan, Naruto, Ted Lasso, Severance
- Favorite movies: The Dark Knight, The Matrix, Inception, The Social Network
- Bucket list: visit every continent, skydiving, a 315 bench press, an Ironman, restoring an old Corvette from the ground up, Everest base camp in 2027
- Actively seeking internships for Summer and Fall 2026

EXPERIENCE:
1. Software Engineer at ManTech (2024 - Present):
   - Migrating a legacy DoD system to modern microservices (Django, React, GCP, PostgreSQL, AI)
   - Architected a RAG search pipeline using Llama 3.2 (3B) and Pinecone
   - Built 4 Django microservices with GraphQL/PostgreSQL and an OCR + Gemini Flash pipeline, cutting processing time by 90%
   - Developed React/TypeScript interfaces that condensed workflows by 75%
2. Software Engineer (Applied ML) at Candlefish (November 2025 - Present):
   - Designed a scalable data synthesis engine generating 10K structured inputs
   - Engineered a PyTorch U-Net pipeline reaching 0.89 mIoU at 18ms inference latency
3. Software Development Intern at MyEdMaster (May 2024 - August 2024):
   - Built an AI-powered educational platform using GPT-4 and LangChain
   - Architected a RAG system handling 20,000+ documents
   - Developed an automated ETL pipeline using Selenium and BeautifulSoup

PROJECTS:
1. FeatherDB: a lightweight file-based relational database engine in Java
2. GitGuard: a multi-agent code analysis platform that reviews GitHub repositories for security vulnerabilities, performance problems, and missing documentation using LLMs

SKILLS:
- Languages: Python, TypeScript, Java, JavaScript, SQL, R, Assembly, C
- Frameworks: Django, FastAPI, React.js, GraphQL, REST APIs, NumPy, Pandas, Node.js
- AI/ML: LangChain, LangGraph, PyTorch, ChromaDB, RAG pipelines, agentic AI, GPT-4, Gemini, Llama
- Infrastructure: AWS, GCP, Azure, Docker, PostgreSQL, CI/CD, Git/GitHub, Jira, Confluence, VS Code
- Certifications: AWS Cloud Practitioner, Microsoft Azure Fundamentals (AZ-900), MTA Security Fundamentals

CONTACT:
- Email: wyp9mq@virginia.edu
- Website: https://prithvicodes.vercel.app/
- GitHub: github.com/whozpj

Respond naturally as Prithvi (the AI version). Be helpful, friendly, and concise. Never make anything up: if you don't know the answer, say so politely and suggest a question you can answer."#;

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl Persona {
    /// Parse a persona from YAML. Fields left out keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PersonaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a persona from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersonaError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PersonaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Load from `path` when given, otherwise use the built-in persona.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, PersonaError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_persona_is_complete() {
        let persona = Persona::default();
        assert_eq!(persona.name, "Prithvi Raj");
        assert!(persona.greeting.starts_with("Hi!"));
        assert!(persona.fallback_reply.contains("GROQ_API_KEY"));
        assert!(persona.system_prompt.contains("EXPERIENCE:"));
        assert!(persona.system_prompt.contains("SKILLS:"));
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let persona = Persona::from_yaml_str("name: Test Owner\ngreeting: Hello there\n")
            .expect("parse");
        assert_eq!(persona.name, "Test Owner");
        assert_eq!(persona.greeting, "Hello there");
        assert_eq!(persona.fallback_reply, Persona::default().fallback_reply);
        assert_eq!(persona.system_prompt, Persona::default().system_prompt);
    }

    #[test]
    fn camel_case_keys() {
        let persona =
            Persona::from_yaml_str("systemPrompt: Be brief.\nfallbackReply: Offline.\n")
                .expect("parse");
        assert_eq!(persona.system_prompt, "Be brief.");
        assert_eq!(persona.fallback_reply, "Offline.");
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let err = Persona::from_yaml_str("name: [unterminated").unwrap_err();
        assert!(matches!(err, PersonaError::Yaml(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Persona::load("/definitely/not/here.yaml").unwrap_err();
        match err {
            PersonaError::Io { path, .. } => assert!(path.ends_with("here.yaml")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_reads_yaml_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "name: File Owner\nfallbackReply: From a file").expect("write");

        let persona = Persona::load_or_default(Some(file.path())).expect("load");
        assert_eq!(persona.name, "File Owner");
        assert_eq!(persona.fallback_reply, "From a file");
        assert_eq!(persona.greeting, Persona::default().greeting);
    }

    #[test]
    fn load_or_default_without_path() {
        let persona = Persona::load_or_default(None).expect("default");
        assert_eq!(persona, Persona::default());
    }
}
