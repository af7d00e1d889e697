use fundlink_types::models::{Investor, StartupProject, UserId};

/// Categories a startup project may pick. `Other` is only offered when
/// creating a project, not when filtering.
pub const STARTUP_CATEGORIES: &[&str] = &[
    "HealthTech",
    "EdTech",
    "FinTech",
    "AI & Machine Learning",
    "SaaS",
    "E-commerce",
    "Sustainability",
    "CleanTech",
    "AgriTech",
    "Consumer Tech",
    "Enterprise Software",
    "Blockchain",
    "IoT",
    "Cybersecurity",
];

pub const OTHER_CATEGORY: &str = "Other";

pub const INVESTOR_FOCUS_AREAS: &[&str] = &[
    "HealthTech",
    "AI",
    "SaaS",
    "Sustainability",
    "CleanTech",
    "AgriTech",
    "EdTech",
    "FinTech",
    "Consumer",
    "Enterprise",
    "Machine Learning",
];

pub const FUNDING_STAGES: &[&str] = &[
    "Pre-seed", "Seed", "Series A", "Series B", "Series C", "Growth",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn investors() -> Vec<Investor> {
    vec![
        Investor {
            id: UserId::from("investor1"),
            name: "Sarah Chen".into(),
            company: "TechVentures Capital".into(),
            focus_areas: strings(&["HealthTech", "AI", "SaaS"]),
            funding_stages: strings(&["Seed", "Series A"]),
            description: "Early-stage investor focused on healthcare innovation and AI-driven solutions. 15+ years experience in tech investing.".into(),
            location: "San Francisco, CA".into(),
        },
        Investor {
            id: UserId::from("investor2"),
            name: "Michael Rodriguez".into(),
            company: "GreenFund Partners".into(),
            focus_areas: strings(&["Sustainability", "CleanTech", "AgriTech"]),
            funding_stages: strings(&["Pre-seed", "Seed"]),
            description: "Passionate about sustainable technology and environmental impact. Focus on early-stage climate solutions.".into(),
            location: "Austin, TX".into(),
        },
        Investor {
            id: UserId::from("investor3"),
            name: "Lisa Wang".into(),
            company: "EdTech Innovations".into(),
            focus_areas: strings(&["EdTech", "FinTech", "Consumer"]),
            funding_stages: strings(&["Seed", "Series A", "Series B"]),
            description: "Former educator turned investor. Specializes in education technology and financial inclusion platforms.".into(),
            location: "Boston, MA".into(),
        },
        Investor {
            id: UserId::from("investor4"),
            name: "David Kumar".into(),
            company: "AI Ventures".into(),
            focus_areas: strings(&["AI", "Machine Learning", "Enterprise"]),
            funding_stages: strings(&["Series A", "Series B"]),
            description: "Deep tech investor with PhD in Computer Science. Focus on enterprise AI and machine learning applications.".into(),
            location: "New York, NY".into(),
        },
    ]
}

fn startup(
    id: &str,
    name: &str,
    idea: &str,
    implementation: &str,
    target_audience: &str,
    problem_solution: &str,
    category: &str,
) -> StartupProject {
    StartupProject {
        id: id.to_string(),
        name: name.to_string(),
        idea: idea.to_string(),
        implementation: implementation.to_string(),
        target_audience: target_audience.to_string(),
        problem_solution: problem_solution.to_string(),
        category: category.to_string(),
        user_id: UserId::from(id),
    }
}

pub fn startups() -> Vec<StartupProject> {
    vec![
        startup(
            "startup1",
            "MedAssist AI",
            "AI-powered diagnostic assistant that helps doctors analyze medical images and provide preliminary diagnoses with 95% accuracy.",
            "Healthcare industry, starting with hospitals in North America and expanding to developing countries.",
            "Healthcare providers, hospitals, diagnostic centers, and medical professionals.",
            "Addresses the shortage of radiologists and reduces diagnostic errors. Provides faster, more accurate preliminary diagnoses.",
            "HealthTech",
        ),
        startup(
            "startup2",
            "EcoFarm Solutions",
            "IoT-based smart farming platform that optimizes crop yield while reducing water usage by 40% through precision agriculture.",
            "Agricultural sector, focusing on medium to large farms in water-scarce regions globally.",
            "Commercial farmers, agricultural cooperatives, and agtech companies.",
            "Solves water scarcity in agriculture and improves crop yields through data-driven farming decisions.",
            "AgriTech",
        ),
        startup(
            "startup3",
            "LearnPath",
            "Personalized AI tutor that adapts to individual learning styles and provides customized educational content for K-12 students.",
            "Education sector, targeting schools and homeschooling families in English-speaking markets.",
            "K-12 students, parents, teachers, and educational institutions.",
            "Addresses the one-size-fits-all problem in education by providing personalized learning experiences.",
            "EdTech",
        ),
        startup(
            "startup4",
            "CyberShield",
            "Real-time cybersecurity platform that uses machine learning to detect and prevent cyber threats before they impact businesses.",
            "Enterprise market, focusing on small to medium businesses that lack robust cybersecurity infrastructure.",
            "SMB business owners, IT managers, and companies with limited cybersecurity resources.",
            "Provides enterprise-level cybersecurity protection at an affordable price point for smaller businesses.",
            "Cybersecurity",
        ),
        startup(
            "startup5",
            "GreenEnergy Hub",
            "Peer-to-peer renewable energy trading platform that allows households to buy and sell excess solar energy.",
            "Residential energy market, starting in regions with high solar adoption like California and Australia.",
            "Homeowners with solar panels, environmentally conscious consumers, and energy cooperatives.",
            "Enables better utilization of renewable energy and provides additional income for solar panel owners.",
            "CleanTech",
        ),
    ]
}
