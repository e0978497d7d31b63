use super::super::domain::{QualitativeAnalysis, QuantitativeIndicators};

const GENERAL_RECOMMENDATIONS: [&str; 3] = [
    "Manter higienização adequada com produtos apropriados.",
    "Evitar tração excessiva nos fios.",
    "Realizar massagem capilar para estimular microcirculação.",
];

pub(crate) fn describe(indicators: &QuantitativeIndicators) -> QualitativeAnalysis {
    QualitativeAnalysis {
        summary: summary(indicators),
        findings: findings(indicators),
        recommendations: recommendations(indicators),
    }
}

fn summary(indicators: &QuantitativeIndicators) -> String {
    let oiliness = if indicators.oleosidade > 0.6 {
        "com oleosidade acentuada"
    } else if indicators.oleosidade > 0.4 {
        "levemente oleoso"
    } else {
        "com oleosidade controlada"
    };

    let density = if indicators.densidade_capilar < 0.5 {
        " e rarefação capilar evidente"
    } else if indicators.densidade_capilar < 0.7 {
        " e rarefação discreta"
    } else {
        " e boa densidade folicular"
    };

    let miniaturization = if indicators.miniaturizacao > 0.5 {
        " com sinais de miniaturização"
    } else {
        ""
    };

    format!("Couro cabeludo {oiliness}{density}{miniaturization}.")
}

fn findings(indicators: &QuantitativeIndicators) -> Vec<String> {
    let mut findings = Vec::with_capacity(5);

    findings.push(if indicators.densidade_capilar > 0.7 {
        "Boa densidade folicular observada em todas as áreas analisadas."
    } else if indicators.densidade_capilar > 0.5 {
        "Densidade folicular adequada com algumas áreas de menor concentração."
    } else {
        "Redução significativa da densidade folicular em múltiplas regiões."
    });

    findings.push(if indicators.oleosidade > 0.6 {
        "Excesso de oleosidade visível no couro cabeludo."
    } else if indicators.oleosidade < 0.3 {
        "Couro cabeludo com baixa oleosidade, possivelmente ressecado."
    } else {
        "Níveis de oleosidade dentro da normalidade."
    });

    findings.push(if indicators.miniaturizacao > 0.4 {
        "Presença de fios miniaturizados, indicando processo de afinamento."
    } else {
        "Fios com espessura regular, sem sinais evidentes de miniaturização."
    });

    if indicators.descamacao > 0.3 {
        findings.push("Descamação visível em algumas áreas do couro cabeludo.");
    }

    findings.push(if indicators.inflamacao > 0.2 {
        "Sinais de inflamação leve observados."
    } else {
        "Couro cabeludo sem sinais evidentes de inflamação."
    });

    findings.into_iter().map(str::to_string).collect()
}

fn recommendations(indicators: &QuantitativeIndicators) -> Vec<String> {
    let mut items: Vec<&str> = Vec::new();

    if indicators.oleosidade > 0.6 {
        items.push("Utilizar shampoo específico para controle de oleosidade.");
        items.push("Evitar lavagens excessivas que podem estimular a produção de sebo.");
    } else if indicators.oleosidade < 0.3 {
        items.push("Usar produtos hidratantes para o couro cabeludo.");
        items.push("Evitar shampoos muito agressivos.");
    }

    if indicators.densidade_capilar < 0.6 {
        items.push("Acompanhar evolução capilar a cada 30 dias.");
        items.push("Considerar tratamento específico para densidade folicular.");
    }

    if indicators.miniaturizacao > 0.4 {
        items.push("Implementar protocolo anti-miniaturização.");
        items.push("Acompanhar progressão do afinamento folicular.");
    }

    if indicators.descamacao > 0.3 {
        items.push("Tratar descamação com produtos específicos.");
    }

    if indicators.inflamacao > 0.2 {
        items.push("Investigar causas da inflamação e tratar adequadamente.");
    }

    items.extend(GENERAL_RECOMMENDATIONS);
    items.into_iter().map(str::to_string).collect()
}
