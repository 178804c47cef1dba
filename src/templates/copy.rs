//! Localized copy for outreach emails.
//!
//! Placeholders are substituted by [`super::fill`]:
//! `{first_name}`, `{company}`, `{job_title}`, `{sender_name}`,
//! `{sender_title}`, `{sender_company}`.

use crate::models::{FollowUpStage, Language};

/// Copy for the initial outreach email.
#[derive(Debug, Clone, Copy)]
pub struct InitialCopy {
    pub subject: &'static str,
    pub greeting: &'static str,
    pub introduction: &'static str,
    pub value_proposition: &'static str,
    pub relevance: &'static str,
    pub call_to_action: &'static str,
    pub cta_button: &'static str,
    pub booking_prompt: &'static str,
    pub closing: &'static str,
}

/// Copy for the three follow-up stages.
#[derive(Debug, Clone, Copy)]
pub struct FollowUpCopy {
    pub subjects: [&'static str; 3],
    pub greeting: &'static str,
    pub bodies: [&'static [&'static str]; 3],
    pub cta_button: &'static str,
    pub booking_prompt: &'static str,
    pub closing: &'static str,
}

impl FollowUpCopy {
    pub fn subject(&self, stage: FollowUpStage) -> &'static str {
        self.subjects[stage_index(stage)]
    }

    pub fn body(&self, stage: FollowUpStage) -> &'static [&'static str] {
        self.bodies[stage_index(stage)]
    }
}

fn stage_index(stage: FollowUpStage) -> usize {
    usize::from(stage.number() - 1)
}

pub fn initial_copy(language: Language) -> &'static InitialCopy {
    match language {
        Language::English => &ENGLISH_INITIAL,
        Language::Arabic => &ARABIC_INITIAL,
        Language::French => &FRENCH_INITIAL,
    }
}

pub fn follow_up_copy(language: Language) -> &'static FollowUpCopy {
    match language {
        Language::English => &ENGLISH_FOLLOW_UP,
        Language::Arabic => &ARABIC_FOLLOW_UP,
        Language::French => &FRENCH_FOLLOW_UP,
    }
}

// ===== English =====

static ENGLISH_INITIAL: InitialCopy = InitialCopy {
    subject: "Quick question about {company}'s document automation",
    greeting: "Dear {first_name},",
    introduction: "My name is {sender_name} and I'm the {sender_title} of {sender_company}.",
    value_proposition: "My company has developed a new way that reduces the time spent moving from papers and pictures to documents by 80%, and ships custom document automation in days, not months.",
    relevance: "I figured this might be of interest to you as {job_title} at {company}, given the move to automation with AI and the push to speed up the supply chain process.",
    call_to_action: "I'd love to get your feedback even if you're not in the market for this right now. Do you have 20 min this week?",
    cta_button: "Book a 20-minute call",
    booking_prompt: "You can use my calendar to book a meeting at your convenience:",
    closing: "Best regards,",
};

static ENGLISH_FOLLOW_UP: FollowUpCopy = FollowUpCopy {
    subjects: [
        "Following up - {company} document automation",
        "Re: saving time on documents at {company}",
        "Closing the loop, {first_name}",
    ],
    greeting: "Hi {first_name},",
    bodies: [
        &[
            "I wanted to follow up on my previous email about document automation for {company}.",
            "I understand you're likely busy, so I'll keep this brief: we turn paper forms and photos into structured documents in minutes instead of hours.",
            "Would a short call this week work for you?",
        ],
        &[
            "Many operations leaders I speak with are dealing with similar challenges:",
            "Manual data entry that slows down decision-making, documents scattered across email and paper, and little visibility on processing time.",
            "If any of these resonate with your situation as {job_title}, I'd be happy to share a few quick wins that have worked for similar companies.",
        ],
        &[
            "I haven't heard back, so I'll assume the timing isn't right and this will be my last note.",
            "Even if you're not interested in our solution, I'd value your perspective on the biggest document challenges at {company} today.",
            "If things change, my calendar stays open.",
        ],
    ],
    cta_button: "Book a 10-minute call",
    booking_prompt: "Pick a time that suits you:",
    closing: "Best regards,",
};

// ===== Arabic =====

static ARABIC_INITIAL: InitialCopy = InitialCopy {
    subject: "سؤال سريع حول أتمتة المستندات في {company}",
    greeting: "عزيزي {first_name}،",
    introduction: "اسمي {sender_name}، وأنا {sender_title} في {sender_company}.",
    value_proposition: "طورت شركتنا طريقة جديدة تقلل الوقت المستغرق في تحويل الأوراق والصور إلى مستندات رقمية بنسبة 80%، ونقدم حلول أتمتة مخصصة خلال أيام بدلاً من أشهر.",
    relevance: "اعتقدت أن هذا قد يهمك بصفتك {job_title} في {company}، خاصة مع التوجه نحو الأتمتة بالذكاء الاصطناعي وتسريع سلسلة الإمداد.",
    call_to_action: "يسعدني الاستماع إلى رأيك حتى لو لم تكن تبحث عن حل مماثل حالياً. هل لديك 20 دقيقة هذا الأسبوع؟",
    cta_button: "احجز مكالمة لمدة 20 دقيقة",
    booking_prompt: "يمكنك حجز موعد يناسبك عبر الرابط التالي:",
    closing: "مع أطيب التحيات،",
};

static ARABIC_FOLLOW_UP: FollowUpCopy = FollowUpCopy {
    subjects: [
        "متابعة - أتمتة المستندات في {company}",
        "توفير الوقت في معالجة المستندات لدى {company}",
        "رسالتي الأخيرة يا {first_name}",
    ],
    greeting: "مرحباً {first_name}،",
    bodies: [
        &[
            "أردت متابعة رسالتي السابقة بخصوص أتمتة المستندات في {company}.",
            "أعلم أن وقتك ثمين، لذا باختصار: نحول النماذج الورقية والصور إلى مستندات منظمة خلال دقائق بدلاً من ساعات.",
            "هل تناسبك مكالمة قصيرة هذا الأسبوع؟",
        ],
        &[
            "يواجه كثير من مسؤولي العمليات الذين أتحدث معهم تحديات مشابهة:",
            "إدخال بيانات يدوي يبطئ اتخاذ القرار، ومستندات متفرقة بين البريد والورق، وضعف الرؤية على زمن المعالجة.",
            "إذا كان أي من ذلك يعكس وضعك بصفتك {job_title}، يسعدني مشاركة بعض الحلول السريعة التي نجحت مع شركات مماثلة.",
        ],
        &[
            "لم أتلق رداً، لذا أفترض أن التوقيت غير مناسب وستكون هذه رسالتي الأخيرة.",
            "حتى إن لم يكن الحل مناسباً لكم، يهمني رأيك في أكبر تحديات المستندات في {company} اليوم.",
            "إذا تغيرت الظروف، فموعدي متاح دائماً.",
        ],
    ],
    cta_button: "احجز مكالمة لمدة 10 دقائق",
    booking_prompt: "اختر الوقت الذي يناسبك:",
    closing: "مع أطيب التحيات،",
};

// ===== French =====

static FRENCH_INITIAL: InitialCopy = InitialCopy {
    subject: "Petite question sur l'automatisation documentaire chez {company}",
    greeting: "Bonjour {first_name},",
    introduction: "Je m'appelle {sender_name} et je suis {sender_title} de {sender_company}.",
    value_proposition: "Notre entreprise a développé une nouvelle méthode qui réduit de 80% le temps passé à transformer papiers et photos en documents, et livre une automatisation documentaire sur mesure en quelques jours, pas en quelques mois.",
    relevance: "J'ai pensé que cela pourrait vous intéresser en tant que {job_title} chez {company}, avec le passage à l'automatisation par l'IA et l'accélération de la chaîne logistique.",
    call_to_action: "J'aimerais beaucoup avoir votre avis, même si vous n'êtes pas à la recherche de ce type de solution en ce moment. Auriez-vous 20 minutes cette semaine ?",
    cta_button: "Réserver un appel de 20 minutes",
    booking_prompt: "Vous pouvez réserver un créneau à votre convenance :",
    closing: "Bien cordialement,",
};

static FRENCH_FOLLOW_UP: FollowUpCopy = FollowUpCopy {
    subjects: [
        "Suite à mon message - automatisation documentaire chez {company}",
        "Gagner du temps sur vos documents chez {company}",
        "Dernier message, {first_name}",
    ],
    greeting: "Bonjour {first_name},",
    bodies: [
        &[
            "Je me permets de revenir vers vous au sujet de l'automatisation documentaire pour {company}.",
            "Je sais que vous êtes sans doute très occupé, je serai donc bref : nous transformons formulaires papier et photos en documents structurés en quelques minutes au lieu de plusieurs heures.",
            "Un court appel cette semaine vous conviendrait-il ?",
        ],
        &[
            "Beaucoup de responsables des opérations avec qui j'échange rencontrent les mêmes difficultés :",
            "Une saisie manuelle qui ralentit les décisions, des documents dispersés entre e-mails et papier, et peu de visibilité sur les délais de traitement.",
            "Si cela correspond à votre situation en tant que {job_title}, je serais ravi de partager quelques gains rapides obtenus chez des entreprises similaires.",
        ],
        &[
            "Sans retour de votre part, je suppose que le moment n'est pas idéal et ce sera mon dernier message.",
            "Même si notre solution ne vous intéresse pas, votre avis sur les principaux défis documentaires chez {company} me serait précieux.",
            "Si les choses évoluent, mon agenda reste ouvert.",
        ],
    ],
    cta_button: "Réserver un appel de 10 minutes",
    booking_prompt: "Choisissez le créneau qui vous convient :",
    closing: "Bien cordialement,",
};
