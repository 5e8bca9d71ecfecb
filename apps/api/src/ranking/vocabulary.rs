//! Process-wide lookup tables for the ranking engine.
//!
//! Everything here is immutable. Compiled regexes built from these tables live
//! in `LazyLock` statics inside the modules that use them.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Canonical skill names. Matching is case-insensitive; the spelling here is
/// what callers see in results.
pub const SKILL_VOCABULARY: &[&str] = &[
    // Languages
    "Python", "Java", "C++", "C", "C#", "JavaScript", "TypeScript", "Go", "Rust", "Swift",
    "Kotlin", "PHP", "Ruby", "Scala", "R", "Matlab", "Dart", "Lua", "Perl", "Shell", "Bash",
    // Web & frameworks
    "HTML", "CSS", "React", "Angular", "Vue", "Next.js", "Node.js", "Django", "Flask",
    "FastAPI", "Spring Boot", "ASP.NET", "Laravel", "Ruby on Rails", "Tailwind", "Bootstrap",
    "jQuery", "GraphQL", "REST API",
    // Data science & ML
    "Machine Learning", "Deep Learning", "Data Science", "NLP", "Computer Vision",
    "TensorFlow", "PyTorch", "Keras", "Scikit-learn", "Pandas", "NumPy", "Matplotlib",
    "Seaborn", "OpenCV", "Hugging Face", "LLM", "Generative AI", "NLTK", "Spacy", "Jupyter",
    // Cloud & DevOps
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Ansible", "Jenkins", "Git",
    "GitHub", "GitLab", "CI/CD", "Linux", "Unix", "Nginx", "Apache", "Heroku", "Vercel",
    "Netlify",
    // Databases
    "SQL", "NoSQL", "MongoDB", "PostgreSQL", "MySQL", "Oracle", "Redis", "Cassandra",
    "Elasticsearch", "DynamoDB", "Firebase", "Snowflake", "Databricks",
    // Concepts & tools
    "Algorithms", "Data Structures", "System Design", "OOP", "Functional Programming",
    "Agile", "Scrum", "Jira", "Trello", "Unit Testing", "Selenium", "Postman", "Swagger",
];

/// Experience section headers in priority order.
pub const EXPERIENCE_HEADERS: &[&str] = &[
    "work experience",
    "professional experience",
    "experience",
    "employment",
    "employment history",
    "work history",
];

/// Headers that close the experience section.
pub const STOP_HEADERS: &[&str] = &[
    "education",
    "projects",
    "skills",
    "certifications",
    "achievements",
    "leadership",
    "interests",
    "hobbies",
    "languages",
    "summary",
];

pub const PRESENT_TOKENS: &[&str] = &["present", "current", "now"];

pub const HIGHER_DEGREE_KEYWORDS: &[&str] = &["master", "phd", "m.tech", "ms"];

pub const DEGREE_KEYWORDS: &[&str] = &["bachelor", "degree", "university", "college", "b.tech", "bs"];

/// Section names an ATS expects to find somewhere in a resume.
pub const ATS_SECTIONS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "projects",
    "certifications",
    "summary",
];

/// Engineering-impact vocabulary rewarded by the ATS bonus.
pub const IMPACT_KEYWORDS: &[&str] = &[
    "designed",
    "implemented",
    "optimized",
    "scalable",
    "distributed",
    "latency",
    "throughput",
    "rps",
    "ci/cd",
    "docker",
    "kubernetes",
    "aws",
];

/// Terms of at most this many characters are whitespace-anchored instead of
/// word-boundary matched, so "C" never matches inside "Center".
pub const SHORT_TERM_MAX_CHARS: usize = 3;

/// Standard English stop words dropped before term vectorization.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg", "eight",
    "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "few", "fifteen", "fifty",
    "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty", "found",
    "four", "from", "front", "full", "further", "get", "give", "go", "had", "has", "hasnt",
    "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hereupon",
    "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie", "if",
    "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must",
    "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine",
    "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off",
    "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
    "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please",
    "put", "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious",
    "several", "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so",
    "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere",
    "still", "such", "system", "take", "ten", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "these", "they", "thick", "thin", "third", "this", "those",
    "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein",
    "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

pub fn is_short_term(term: &str) -> bool {
    term.chars().count() <= SHORT_TERM_MAX_CHARS
}

/// Builds the match pattern for a vocabulary term, to be run against lowercased text.
///
/// Short terms must be preceded by start-of-text or whitespace and followed by
/// end-of-text, whitespace, `,`, `.` or `/`. Longer terms match on word boundaries.
pub fn keyword_pattern(term: &str) -> String {
    let escaped = regex::escape(&term.to_lowercase());
    if is_short_term(term) {
        format!(r"(?:^|\s){escaped}(?:$|[\s,./])")
    } else {
        format!(r"\b{escaped}\b")
    }
}
