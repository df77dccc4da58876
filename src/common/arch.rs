use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// CPU architecture, named the way Debian packages name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Amd64,
    Arm64,
    I386,
    Armhf,
    Riscv64,
    Ppc64el,
    S390x,
}

// x86_64 must be tried before the bare x86 alias
const ARCH_ALIASES: &[(&str, Architecture)] = &[
    ("x86_64|amd64", Architecture::Amd64),
    ("aarch64|arm64|armv8", Architecture::Arm64),
    ("i[3-6]86|^x86$", Architecture::I386),
    ("armv7|armhf|^arm$", Architecture::Armhf),
    ("riscv64", Architecture::Riscv64),
    ("ppc64le|powerpc64", Architecture::Ppc64el),
    ("s390x", Architecture::S390x),
];

lazy_static! {
    static ref ALIASES: Vec<(Regex, Architecture)> = ARCH_ALIASES
        .iter()
        .map(|(pattern, arch)| {
            let regex =
                Regex::new(pattern).unwrap_or_else(|e| panic!("bad pattern {pattern}: {e}"));
            (regex, *arch)
        })
        .collect();
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::I386 => "i386",
            Self::Armhf => "armhf",
            Self::Riscv64 => "riscv64",
            Self::Ppc64el => "ppc64el",
            Self::S390x => "s390x",
        }
    }

    /// Map a machine type (`uname -m` style) to an architecture.
    pub fn from_machine(machine: &str) -> Option<Self> {
        let machine = machine.trim().to_lowercase();
        ALIASES
            .iter()
            .find(|(regex, _)| regex.is_match(&machine))
            .map(|(_, arch)| *arch)
    }

    /// Architecture of the running binary.
    pub fn detect() -> Option<Self> {
        Self::from_machine(std::env::consts::ARCH)
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
